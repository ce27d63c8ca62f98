//! Per-chain token balance sources.
use alloy_primitives::Address;
use async_trait::async_trait;
use color_eyre::eyre;

use crate::{chain::Chain, portfolio::Token};

pub use balances::{Erc20Token, RpcTokenSource, format_balance};
pub use mock::MockTokenSource;

mod balances;
mod mock;

/// Something that can list the tokens an account holds on one chain.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch_tokens(&self, account: Address, chain: &Chain) -> eyre::Result<Vec<Token>>;
}
