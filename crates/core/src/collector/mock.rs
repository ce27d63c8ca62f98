use alloy_primitives::Address;
use async_trait::async_trait;
use color_eyre::eyre;

use super::TokenSource;
use crate::{chain::Chain, portfolio::Token};

/// Answers every chain with the same two holdings, tagged with the chain id.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTokenSource;

#[async_trait]
impl TokenSource for MockTokenSource {
    async fn fetch_tokens(&self, _account: Address, chain: &Chain) -> eyre::Result<Vec<Token>> {
        Ok(vec![
            Token::new("Ethereum", "ETH", "1.234", chain.chain_id),
            Token::new("Binance Coin", "BNB", "2.567", chain.chain_id),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::supported_chains;

    #[tokio::test]
    async fn test_mock_tokens_carry_chain_id() {
        for chain in supported_chains() {
            let tokens = MockTokenSource
                .fetch_tokens(Address::ZERO, &chain)
                .await
                .unwrap();

            assert_eq!(tokens.len(), 2);
            assert!(tokens.iter().all(|t| t.chain_id == chain.chain_id));
            assert_eq!(tokens[0].symbol, "ETH");
            assert_eq!(tokens[1].balance, "2.567");
        }
    }
}
