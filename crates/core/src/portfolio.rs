use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use alloy_primitives::Address;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::AggregateError;

/// Placeholder shown wherever a price could not be looked up.
pub const NO_DATA: &str = "No data found";

/// A token balance held by the wallet on one chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    pub symbol: String,
    /// Human-readable decimal amount, e.g. `"1.234"`.
    pub balance: String,
    pub chain_id: u64,
}

impl Token {
    pub fn new(name: &str, symbol: &str, balance: &str, chain_id: u64) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            balance: balance.to_string(),
            chain_id,
        }
    }

    /// Key of this token in a [`PriceMap`].
    pub fn price_key(&self) -> String {
        self.symbol.to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceEntry {
    Usd(f64),
    NoData,
}

impl PriceEntry {
    pub fn usd(&self) -> Option<f64> {
        match self {
            Self::Usd(price) => Some(*price),
            Self::NoData => None,
        }
    }
}

impl Display for PriceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usd(price) => write!(f, "{price}"),
            Self::NoData => f.write_str(NO_DATA),
        }
    }
}

impl Serialize for PriceEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Usd(price) => serializer.serialize_f64(*price),
            Self::NoData => serializer.serialize_str(NO_DATA),
        }
    }
}

/// Lowercase token symbol to USD price. Later inserts overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceMap(BTreeMap<String, PriceEntry>);

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: &str, entry: PriceEntry) -> Option<PriceEntry> {
        self.0.insert(symbol.to_lowercase(), entry)
    }

    pub fn get(&self, symbol: &str) -> Option<&PriceEntry> {
        self.0.get(&symbol.to_lowercase())
    }

    /// Price for `symbol`, falling back to [`PriceEntry::NoData`] when absent.
    pub fn lookup(&self, symbol: &str) -> PriceEntry {
        self.get(symbol).copied().unwrap_or(PriceEntry::NoData)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains_key(&symbol.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PriceEntry)> {
        self.0.iter()
    }
}

/// Result of one aggregation run for a wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    pub address: Address,
    pub tokens: Vec<Token>,
    pub prices: PriceMap,
    /// Non-fatal errors hit during the run.
    pub failures: Vec<AggregateError>,
}

impl Portfolio {
    pub fn empty(address: Address) -> Self {
        Self {
            address,
            tokens: Vec::new(),
            prices: PriceMap::new(),
            failures: Vec::new(),
        }
    }

    /// `balance × price`, when both are known.
    pub fn value_of(&self, token: &Token) -> Option<f64> {
        let balance: f64 = token.balance.parse().ok()?;
        let price = self.prices.lookup(&token.symbol).usd()?;
        Some(balance * price)
    }

    pub fn total_value_usd(&self) -> f64 {
        self.tokens.iter().filter_map(|t| self.value_of(t)).sum()
    }
}
