//! Plain-text rendering of chains, portfolios and charts.
use std::fmt::Write as _;

use chainfolio_core::{chain::Chain, chart::ChartSeries, portfolio::Portfolio};
use tabled::{Table, Tabled, settings::Style};

const BAR_WIDTH: f64 = 40.0;

#[derive(Tabled)]
struct ChainRow {
    #[tabled(rename = "Chain")]
    name: String,
    #[tabled(rename = "Chain ID")]
    chain_id: u64,
    #[tabled(rename = "Native")]
    native: String,
}

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "Token")]
    name: String,
    #[tabled(rename = "Chain")]
    chain: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Price (USD)")]
    price: String,
    #[tabled(rename = "Value (USD)")]
    value: String,
}

fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{table}\n")
}

pub(crate) fn chains_table(chains: &[Chain]) -> String {
    table(chains.iter().map(|chain| ChainRow {
        name: chain.name.clone(),
        chain_id: chain.chain_id,
        native: chain.native.symbol.clone(),
    }))
}

pub(crate) fn portfolio_table(portfolio: &Portfolio, chains: &[Chain]) -> String {
    let chain_name = |chain_id: u64| {
        chains
            .iter()
            .find(|c| c.chain_id == chain_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| chain_id.to_string())
    };

    let rows = portfolio.tokens.iter().map(|token| TokenRow {
        name: token.name.clone(),
        chain: chain_name(token.chain_id),
        balance: token.balance.clone(),
        price: portfolio.prices.lookup(&token.symbol).to_string(),
        value: portfolio
            .value_of(token)
            .map(|value| format!("{value:.2}"))
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut out = format!("Wallet Address: {}\n\n", portfolio.address);
    out.push_str(&table(rows));
    let _ = writeln!(out, "\nTotal value (USD): {:.2}", portfolio.total_value_usd());
    for failure in &portfolio.failures {
        let _ = writeln!(out, "warning: {failure}");
    }
    out
}

pub(crate) fn chart(series: &ChartSeries) -> String {
    let max = series.max_value().unwrap_or_default();
    let label_width = series.labels().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = format!("{}\n", series.label);
    for point in &series.points {
        let len = if max > 0.0 {
            ((point.value / max) * BAR_WIDTH).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "{:<label_width$} │{} {}",
            point.label,
            "█".repeat(len),
            point.value
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use chainfolio_core::{
        chain::supported_chains,
        chart::synthetic_series,
        error::AggregateError,
        portfolio::{PriceEntry, Token},
    };

    use super::*;

    fn portfolio() -> Portfolio {
        let mut portfolio = Portfolio::empty(Address::ZERO);
        portfolio.tokens = vec![
            Token::new("Ethereum", "ETH", "1.5", 1),
            Token::new("Binance Coin", "BNB", "2", 56),
        ];
        portfolio.prices.insert("eth", PriceEntry::Usd(2000.0));
        portfolio.prices.insert("bnb", PriceEntry::NoData);
        portfolio.failures.push(AggregateError::PriceLookupFailed {
            symbol: "bnb".to_string(),
            reason: "timeout".to_string(),
        });
        portfolio
    }

    #[test]
    fn test_portfolio_table_shows_sentinel_and_total() {
        let out = portfolio_table(&portfolio(), &supported_chains());

        assert!(out.contains("Binance Smart Chain"));
        assert!(out.contains("No data found"));
        assert!(out.contains("3000.00"));
        assert!(out.contains("Total value (USD): 3000.00"));
        assert!(out.contains("warning: price lookup failed for bnb: timeout"));

        let header = out.lines().nth(2).unwrap();
        assert!(header.contains("Token"));
        assert!(header.contains("Value (USD)"));
    }

    #[test]
    fn test_chains_table_lists_all_chains() {
        let out = chains_table(&supported_chains());
        // header, rule and one line per chain
        assert_eq!(out.lines().count(), 10);
        assert!(out.contains("zkSync"));
    }

    #[test]
    fn test_chart_scales_bars_to_max() {
        let out = chart(&synthetic_series("eth"));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "ETH Price");
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[6].matches('█').count(), 40);
        assert_eq!(lines[4].matches('█').count(), 20);
        assert!(lines[1].starts_with("Jan │"));
    }
}
