use std::collections::HashMap;

use alloy::{
    primitives::{U256, utils::format_units},
    providers::{Provider, ProviderBuilder},
    sol,
};
use alloy_primitives::Address;
use async_trait::async_trait;
use color_eyre::eyre::{self, WrapErr as _, eyre};
use tracing::{debug, instrument};

use super::TokenSource;
use crate::{chain::Chain, config::TokenConfig, portfolio::Token};

// Taken from https://github.com/OpenZeppelin/openzeppelin-contracts/blob/3790c59623e99cb0272ddf84e6a17a5979d06b35/contracts/token/ERC20/IERC20.sol
sol!(
    #[sol(rpc)]
    contract IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }
);

const NATIVE_DECIMALS: u8 = 18;

/// An ERC-20 deployment on one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erc20Token {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub address: Address,
}

/// Reads the native balance and configured ERC-20 balances over the chain's JSON-RPC.
#[derive(Debug, Clone, Default)]
pub struct RpcTokenSource {
    tokens_by_chain: HashMap<u64, Vec<Erc20Token>>,
}

impl RpcTokenSource {
    pub fn new(token_configs: &[TokenConfig]) -> Self {
        let mut tokens_by_chain: HashMap<u64, Vec<Erc20Token>> = HashMap::new();
        for config in token_configs {
            for deployment in &config.deployments {
                tokens_by_chain
                    .entry(deployment.chain_id)
                    .or_default()
                    .push(Erc20Token {
                        name: config.name.clone(),
                        symbol: config.symbol.clone(),
                        decimals: config.decimals,
                        address: deployment.address,
                    });
            }
        }
        Self { tokens_by_chain }
    }

    pub fn tokens_for(&self, chain_id: u64) -> &[Erc20Token] {
        self.tokens_by_chain
            .get(&chain_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[async_trait]
impl TokenSource for RpcTokenSource {
    #[instrument(skip(self, chain), fields(chain.id = chain.chain_id))]
    async fn fetch_tokens(&self, account: Address, chain: &Chain) -> eyre::Result<Vec<Token>> {
        let rpc_url = chain
            .rpc_url
            .as_deref()
            .ok_or_else(|| eyre!("no rpc url configured for {chain}"))?;
        let url: reqwest::Url = rpc_url.parse().wrap_err("failed to parse rpc url")?;
        let provider = ProviderBuilder::new().connect_http(url);

        let native: U256 = provider
            .get_balance(account)
            .await
            .wrap_err("failed to fetch native balance")?;

        let mut tokens = vec![Token::new(
            &chain.native.name,
            &chain.native.symbol,
            &format_balance(native, NATIVE_DECIMALS)?,
            chain.chain_id,
        )];

        for erc20 in self.tokens_for(chain.chain_id) {
            let contract = IERC20::new(erc20.address, provider.clone());
            let raw: U256 = contract
                .balanceOf(account)
                .call()
                .await
                .wrap_err_with(|| format!("failed to fetch {} balance", erc20.symbol))?;
            debug!(token.symbol = %erc20.symbol, %raw, "fetched erc20 balance");

            tokens.push(Token::new(
                &erc20.name,
                &erc20.symbol,
                &format_balance(raw, erc20.decimals)?,
                chain.chain_id,
            ));
        }

        Ok(tokens)
    }
}

/// Formats a raw integer amount as a decimal string without trailing zeros.
pub fn format_balance(raw: U256, decimals: u8) -> eyre::Result<String> {
    let formatted = format_units(raw, decimals).wrap_err("failed to format token amount")?;
    if !formatted.contains('.') {
        return Ok(formatted);
    }
    Ok(formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string())
}
