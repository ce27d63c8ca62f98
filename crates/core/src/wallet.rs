//! Wallet connector: asks a wallet provider to authorize an account.
use alloy_primitives::Address;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::error::WalletError;

/// Capability of a wallet: it can be asked for the accounts the user authorizes.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;
}

/// Requests account access and returns the first authorized address.
#[instrument(skip_all)]
pub async fn connect(provider: &dyn WalletProvider) -> Result<Address, WalletError> {
    let accounts = provider.request_accounts().await.inspect_err(|e| {
        warn!(error = %e, "wallet connection failed");
    })?;
    let address = accounts.into_iter().next().ok_or(WalletError::NoAccounts)?;
    info!(%address, "wallet connected");
    Ok(address)
}

/// A wallet with a fixed answer. Also stands in for "no wallet installed".
#[derive(Debug, Clone, Default)]
pub struct StaticWallet {
    accounts: Option<Vec<Address>>,
}

impl StaticWallet {
    pub fn new(address: Address) -> Self {
        Self {
            accounts: Some(vec![address]),
        }
    }

    pub fn unavailable() -> Self {
        Self { accounts: None }
    }
}

#[async_trait]
impl WalletProvider for StaticWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.accounts
            .clone()
            .ok_or_else(|| WalletError::ProviderUnavailable("no wallet provider installed".into()))
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Vec<Address>>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Talks JSON-RPC over HTTP to a wallet bridge (e.g. a desktop wallet's local RPC port).
#[derive(Debug, Clone)]
pub struct JsonRpcWallet {
    client: reqwest::Client,
    rpc_url: Option<String>,
}

impl JsonRpcWallet {
    pub fn new(client: reqwest::Client, rpc_url: Option<String>) -> Self {
        Self { client, rpc_url }
    }
}

#[async_trait]
impl WalletProvider for JsonRpcWallet {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let url = self
            .rpc_url
            .as_deref()
            .ok_or_else(|| WalletError::ProviderUnavailable("no wallet rpc url configured".into()))?;

        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_requestAccounts",
            "params": [],
        });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        let rpc: RpcResponse = response
            .json()
            .await
            .map_err(|e| WalletError::InvalidResponse(format!("status {status}: {e}")))?;

        match rpc {
            RpcResponse {
                error: Some(RpcErrorObject { code, message }),
                ..
            } => Err(WalletError::Rejected { code, message }),
            RpcResponse {
                result: Some(accounts),
                ..
            } => Ok(accounts),
            RpcResponse { .. } => Err(WalletError::InvalidResponse(
                "response carries neither result nor error".into(),
            )),
        }
    }
}
