use std::fmt::{self, Display};

use alloy_chains::{self, NamedChain};
use serde::{Deserialize, Serialize};

/// (name, chain id, native symbol, native name)
const DEFAULT_CHAINS: [(&str, u64, &str, &str); 8] = [
    ("Ethereum", 1, "ETH", "Ether"),
    ("Binance Smart Chain", 56, "BNB", "Binance Coin"),
    ("Arbitrum", 42161, "ETH", "Ether"),
    ("Optimism", 10, "ETH", "Ether"),
    ("Core", 1116, "CORE", "Core"),
    ("zkSync", 324, "ETH", "Ether"),
    ("Polygon", 137, "POL", "Polygon Ecosystem Token"),
    ("Celo", 42220, "CELO", "Celo"),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NativeCoin {
    pub symbol: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct Chain {
    pub name: String,
    pub chain_id: u64,
    pub native: NativeCoin,
    #[serde(skip)]
    pub metadata: alloy_chains::Chain,
    #[serde(skip)]
    pub rpc_url: Option<String>,
}

impl Chain {
    pub fn new(name: &str, chain_id: u64, native: NativeCoin, rpc_url: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            chain_id,
            native,
            metadata: alloy_chains::Chain::from_id(chain_id),
            rpc_url,
        }
    }

    /// The well-known alloy name for this chain, if alloy has one.
    pub fn named(&self) -> Option<NamedChain> {
        self.metadata.named()
    }

    #[cfg(test)]
    pub fn eth_mainnet() -> Self {
        Self::new(
            "Ethereum",
            1,
            NativeCoin {
                symbol: "ETH".to_string(),
                name: "Ether".to_string(),
            },
            None,
        )
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id={})", self.name, self.chain_id)
    }
}

/// The fixed list of networks the portfolio is aggregated over, in display order.
pub fn supported_chains() -> Vec<Chain> {
    DEFAULT_CHAINS
        .iter()
        .map(|(name, chain_id, symbol, native_name)| {
            Chain::new(
                name,
                *chain_id,
                NativeCoin {
                    symbol: symbol.to_string(),
                    name: native_name.to_string(),
                },
                None,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_supported_chains_order_and_ids() {
        let ids: Vec<u64> = supported_chains().iter().map(|c| c.chain_id).collect();
        assert_eq!(ids, vec![1, 56, 42161, 10, 1116, 324, 137, 42220]);
    }

    #[test]
    fn test_supported_chain_ids_are_unique() {
        let chains = supported_chains();
        let ids: HashSet<u64> = chains.iter().map(|c| c.chain_id).collect();
        assert_eq!(ids.len(), chains.len());
    }

    #[test]
    fn test_metadata_matches_chain_id() {
        for chain in supported_chains() {
            assert_eq!(chain.metadata.id(), chain.chain_id);
        }
        assert_eq!(Chain::eth_mainnet().named(), Some(NamedChain::Mainnet));
    }

    #[test]
    fn test_display() {
        assert_eq!(Chain::eth_mainnet().to_string(), "Ethereum (id=1)");
    }
}
