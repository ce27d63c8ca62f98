use std::sync::Arc;

use alloy_primitives::Address;
use futures::{StreamExt as _, stream};
use tracing::{debug, info, instrument, warn};

use crate::{
    chain::Chain,
    collector::TokenSource,
    error::AggregateError,
    portfolio::{PriceEntry, Portfolio, Token},
    price::PriceSource,
};

/// Builds a [`Portfolio`] by querying every chain for tokens and pricing each token.
///
/// Each chain is handled end to end (tokens, then a price lookup per token)
/// before its result is merged. At most `max_concurrency` chains are in flight
/// at once. Results keep chain order, then source order, whatever the
/// concurrency, so symbol collisions in the price map resolve the same way.
pub struct Aggregator {
    chains: Vec<Chain>,
    token_source: Arc<dyn TokenSource>,
    price_source: Arc<dyn PriceSource>,
    max_concurrency: usize,
}

/// What one chain contributed to a run.
#[derive(Debug, Default)]
struct ChainOutcome {
    tokens: Vec<Token>,
    prices: Vec<PriceEntry>,
    failures: Vec<AggregateError>,
}

impl Aggregator {
    pub fn new(
        chains: Vec<Chain>,
        token_source: Arc<dyn TokenSource>,
        price_source: Arc<dyn PriceSource>,
    ) -> Self {
        Self {
            chains,
            token_source,
            price_source,
            max_concurrency: 1,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    #[instrument(skip(self), fields(chains = self.chains.len(), concurrency = self.max_concurrency))]
    pub async fn run(&self, address: Address) -> Portfolio {
        let chain_futures: Vec<_> = self
            .chains
            .iter()
            .map(|chain| self.collect_chain(address, chain))
            .collect();
        let outcomes: Vec<ChainOutcome> = stream::iter(chain_futures)
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let mut portfolio = Portfolio::empty(address);
        for outcome in outcomes {
            for (token, entry) in outcome.tokens.iter().zip(outcome.prices) {
                portfolio.prices.insert(&token.symbol, entry);
            }
            portfolio.tokens.extend(outcome.tokens);
            portfolio.failures.extend(outcome.failures);
        }

        info!(
            tokens = portfolio.tokens.len(),
            prices = portfolio.prices.len(),
            failures = portfolio.failures.len(),
            "portfolio aggregated"
        );
        portfolio
    }

    async fn collect_chain(&self, address: Address, chain: &Chain) -> ChainOutcome {
        let tokens = match self.token_source.fetch_tokens(address, chain).await {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!(chain.id = chain.chain_id, chain.name = %chain.name, error = %e, "chain query failed");
                return ChainOutcome {
                    failures: vec![AggregateError::ChainQueryFailed {
                        chain_id: chain.chain_id,
                        reason: format!("{e:#}"),
                    }],
                    ..Default::default()
                };
            }
        };
        debug!(chain.id = chain.chain_id, count = tokens.len(), "fetched chain tokens");

        let mut prices = Vec::with_capacity(tokens.len());
        let mut failures = Vec::new();
        for token in &tokens {
            let entry = match self.price_source.usd_price(&token.symbol).await {
                Ok(price) => PriceEntry::Usd(price),
                Err(e) => {
                    warn!(symbol = %token.symbol, error = %e, "price lookup failed");
                    failures.push(AggregateError::PriceLookupFailed {
                        symbol: token.price_key(),
                        reason: format!("{e:#}"),
                    });
                    PriceEntry::NoData
                }
            };
            prices.push(entry);
        }

        ChainOutcome {
            tokens,
            prices,
            failures,
        }
    }
}
