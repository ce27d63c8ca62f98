use alloy_primitives::Address;
use tracing::info;

use crate::{
    aggregator::Aggregator,
    chart::{ChartSeries, synthetic_series},
    error::{AggregateError, SessionError},
    portfolio::{PriceEntry, PriceMap, Portfolio, Token},
    wallet::{self, WalletProvider},
};

/// Everything a front end shows for one user: who is connected, what they
/// hold, what it is worth, and which chart is open.
#[derive(Debug, Clone, Default)]
pub struct Session {
    wallet_address: Option<Address>,
    tokens: Vec<Token>,
    prices: PriceMap,
    failures: Vec<AggregateError>,
    chart: Option<ChartSeries>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wallet_address(&self) -> Option<Address> {
        self.wallet_address
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn prices(&self) -> &PriceMap {
        &self.prices
    }

    /// Non-fatal errors of the last refresh.
    pub fn failures(&self) -> &[AggregateError] {
        &self.failures
    }

    pub fn chart(&self) -> Option<&ChartSeries> {
        self.chart.as_ref()
    }

    /// Asks `provider` for an account. The session is left untouched on failure;
    /// switching to a different account drops the previous account's data.
    pub async fn connect(&mut self, provider: &dyn WalletProvider) -> Result<Address, SessionError> {
        let address = wallet::connect(provider).await?;
        if self.wallet_address.is_some_and(|current| current != address) {
            info!(%address, "switched wallet, clearing portfolio");
            self.tokens.clear();
            self.prices = PriceMap::default();
            self.failures.clear();
            self.chart = None;
        }
        self.wallet_address = Some(address);
        Ok(address)
    }

    /// Re-runs the aggregation for the connected wallet, replacing tokens and
    /// prices wholesale.
    pub async fn refresh(&mut self, aggregator: &Aggregator) -> Result<(), SessionError> {
        let address = self
            .wallet_address
            .ok_or(AggregateError::ConnectionUnavailable)?;

        let Portfolio {
            tokens,
            prices,
            failures,
            ..
        } = aggregator.run(address).await;

        self.tokens = tokens;
        self.prices = prices;
        self.failures = failures;
        Ok(())
    }

    /// Connects, then loads the portfolio straight away.
    pub async fn connect_and_refresh(
        &mut self,
        provider: &dyn WalletProvider,
        aggregator: &Aggregator,
    ) -> Result<Address, SessionError> {
        let address = self.connect(provider).await?;
        self.refresh(aggregator).await?;
        Ok(address)
    }

    /// Opens the chart for a symbol held in the portfolio (case-insensitive).
    pub fn show_chart(&mut self, symbol: &str) -> Result<&ChartSeries, SessionError> {
        let token = self
            .tokens
            .iter()
            .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
            .ok_or_else(|| SessionError::UnknownSymbol(symbol.to_string()))?;

        info!(symbol = %token.symbol, "showing chart");
        Ok(&*self.chart.insert(synthetic_series(&token.symbol)))
    }

    pub fn price_of(&self, token: &Token) -> PriceEntry {
        self.prices.lookup(&token.symbol)
    }

    /// Snapshot of the loaded portfolio, if a wallet is connected.
    pub fn portfolio(&self) -> Option<Portfolio> {
        self.wallet_address.map(|address| Portfolio {
            address,
            tokens: self.tokens.clone(),
            prices: self.prices.clone(),
            failures: self.failures.clone(),
        })
    }

    pub fn total_value_usd(&self) -> f64 {
        self.portfolio()
            .map(|portfolio| portfolio.total_value_usd())
            .unwrap_or_default()
    }
}
