use serde::Serialize;

/// Failures of the wallet connector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    /// No wallet provider is configured, or its endpoint cannot be reached.
    #[error("wallet provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider answered the request with an RPC error. Code 4001 means the user declined.
    #[error("wallet provider rejected the account request (code {code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("wallet provider authorized no accounts")]
    NoAccounts,

    #[error("invalid response from wallet provider: {0}")]
    InvalidResponse(String),
}

/// Errors surfaced by a portfolio run.
///
/// Only [`AggregateError::ConnectionUnavailable`] stops a run; the others are
/// collected into [`crate::portfolio::Portfolio::failures`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregateError {
    #[error("no wallet connected")]
    ConnectionUnavailable,

    #[error("price lookup failed for {symbol}: {reason}")]
    PriceLookupFailed { symbol: String, reason: String },

    #[error("token query failed for chain {chain_id}: {reason}")]
    ChainQueryFailed { chain_id: u64, reason: String },
}

impl AggregateError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConnectionUnavailable)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error("symbol {0} is not in the portfolio")]
    UnknownSymbol(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_unavailable_is_fatal() {
        assert!(AggregateError::ConnectionUnavailable.is_fatal());
        assert!(
            !AggregateError::PriceLookupFailed {
                symbol: "eth".to_string(),
                reason: "timeout".to_string(),
            }
            .is_fatal()
        );
        assert!(
            !AggregateError::ChainQueryFailed {
                chain_id: 56,
                reason: "no rpc".to_string(),
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_aggregate_error_serializes_with_kind_tag() {
        let err = AggregateError::ChainQueryFailed {
            chain_id: 10,
            reason: "boom".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "chain_query_failed");
        assert_eq!(json["chain_id"], 10);
    }
}
