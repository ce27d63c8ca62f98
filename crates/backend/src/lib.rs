pub mod models;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;

pub use models::*;
pub use state::AppState;

/// HTTP API serving the portfolio table and chart data to a browser front end.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/chains", routes::chains::routes())
        .nest("/portfolio", routes::portfolio::routes())
        .nest("/chart", routes::chart::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum_test::TestServer;
    use chainfolio_core::{
        aggregator::Aggregator, chain::supported_chains, collector::MockTokenSource,
        price::PriceSource,
    };
    use color_eyre::eyre::{self, eyre};
    use serde_json::Value;

    use super::*;

    struct EthOnly;

    #[async_trait]
    impl PriceSource for EthOnly {
        async fn usd_price(&self, symbol: &str) -> eyre::Result<f64> {
            match symbol {
                "ETH" => Ok(3000.0),
                _ => Err(eyre!("unknown id")),
            }
        }
    }

    fn server() -> TestServer {
        let aggregator = Aggregator::new(
            supported_chains(),
            Arc::new(MockTokenSource),
            Arc::new(EthOnly),
        );
        TestServer::new(app(AppState::new(aggregator))).unwrap()
    }

    #[tokio::test]
    async fn test_get_chains() {
        let response = server().get("/chains").await;
        response.assert_status_ok();

        let chains: Vec<Value> = response.json();
        assert_eq!(chains.len(), 8);
        assert_eq!(chains[0]["name"], "Ethereum");
        assert_eq!(chains[4]["chain_id"], 1116);
    }

    #[tokio::test]
    async fn test_get_portfolio() {
        let response = server()
            .get("/portfolio/0x742d35Cc6634C0532925a3b844Bc454e4438f44e")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["tokens"].as_array().map(Vec::len), Some(16));
        assert_eq!(body["prices"]["eth"], 3000.0);
        assert_eq!(body["prices"]["bnb"], "No data found");
        assert_eq!(body["failures"].as_array().map(Vec::len), Some(8));
        assert_eq!(body["failures"][0]["kind"], "price_lookup_failed");

        let total = body["total_value_usd"].as_f64().unwrap();
        assert!((total - 8.0 * 1.234 * 3000.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_get_portfolio_rejects_bad_address() {
        let response = server().get("/portfolio/not-an-address").await;
        response.assert_status_bad_request();

        let body: Value = response.json();
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("invalid wallet address")
        );
    }

    #[tokio::test]
    async fn test_get_chart() {
        let response = server().get("/chart/eth").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["label"], "ETH Price");
        assert_eq!(body["points"].as_array().map(Vec::len), Some(6));
        assert_eq!(body["points"][0]["label"], "Jan");
        assert_eq!(body["points"][5]["value"], 500.0);
    }
}
