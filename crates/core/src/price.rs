use std::collections::HashMap;

use async_trait::async_trait;
use color_eyre::eyre::{self, WrapErr as _, eyre};
use tracing::debug;

/// Public CoinGecko API root.
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";

/// A USD spot price feed keyed by token symbol.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn usd_price(&self, symbol: &str) -> eyre::Result<f64>;
}

/// Response shape of `/simple/price`: `{id: {currency: price}}`.
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// Looks prices up on a CoinGecko-compatible `/simple/price` endpoint.
///
/// The price-API id is the lowercase symbol unless `ids` maps the symbol to
/// something else, e.g. `eth -> ethereum`.
#[derive(Debug, Clone)]
pub struct CoinGeckoPriceSource {
    client: reqwest::Client,
    api_url: String,
    ids: HashMap<String, String>,
}

impl CoinGeckoPriceSource {
    pub fn new(client: reqwest::Client, api_url: &str, ids: &HashMap<String, String>) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            ids: ids
                .iter()
                .map(|(symbol, id)| (symbol.to_lowercase(), id.clone()))
                .collect(),
        }
    }

    pub fn price_id(&self, symbol: &str) -> String {
        let key = symbol.to_lowercase();
        self.ids.get(&key).cloned().unwrap_or(key)
    }
}

#[async_trait]
impl PriceSource for CoinGeckoPriceSource {
    async fn usd_price(&self, symbol: &str) -> eyre::Result<f64> {
        let id = self.price_id(symbol);
        let url = format!("{}/simple/price", self.api_url);

        let response: SimplePriceResponse = self
            .client
            .get(&url)
            .query(&[("ids", id.as_str()), ("vs_currencies", "usd")])
            .send()
            .await
            .wrap_err("price request failed")?
            .error_for_status()
            .wrap_err("price api returned an error status")?
            .json()
            .await
            .wrap_err("failed to decode price response")?;

        let price = response
            .get(&id)
            .and_then(|currencies| currencies.get("usd"))
            .copied()
            .ok_or_else(|| eyre!("no usd price for id {id}"))?;

        debug!(%symbol, %id, price, "fetched usd price");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, extract::Query, http::StatusCode, routing::get};
    use serde_json::json;

    use super::*;
    use crate::test_utils::serve;

    async fn fake_price_api() -> String {
        let router = Router::new().route(
            "/simple/price",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                assert_eq!(query.get("vs_currencies").map(String::as_str), Some("usd"));
                match query.get("ids").map(String::as_str) {
                    Some("ethereum") => Ok(Json(json!({"ethereum": {"usd": 3000.5}}))),
                    Some("eth") => Ok(Json(json!({"eth": {"eur": 2800.0}}))),
                    Some("boom") => Err(StatusCode::INTERNAL_SERVER_ERROR),
                    _ => Ok(Json(json!({}))),
                }
            }),
        );
        serve(router).await
    }

    fn source(api_url: &str) -> CoinGeckoPriceSource {
        let ids = HashMap::from([("ETH".to_string(), "ethereum".to_string())]);
        CoinGeckoPriceSource::new(reqwest::Client::new(), api_url, &ids)
    }

    #[test]
    fn test_price_id_defaults_to_lowercase_symbol() {
        let source = source(DEFAULT_PRICE_API_URL);
        assert_eq!(source.price_id("eth"), "ethereum");
        assert_eq!(source.price_id("BNB"), "bnb");
    }

    #[tokio::test]
    async fn test_fetches_usd_price_through_id_override() {
        let api = fake_price_api().await;
        let price = source(&format!("{api}/")).usd_price("ETH").await.unwrap();
        assert_eq!(price, 3000.5);
    }

    #[tokio::test]
    async fn test_unknown_id_is_an_error() {
        let api = fake_price_api().await;
        let err = source(&api).usd_price("NOPE").await.unwrap_err();
        assert!(err.to_string().contains("no usd price"));
    }

    #[tokio::test]
    async fn test_missing_usd_field_is_an_error() {
        let api = fake_price_api().await;
        let source = CoinGeckoPriceSource::new(reqwest::Client::new(), &api, &HashMap::new());
        assert!(source.usd_price("ETH").await.is_err());
    }

    #[tokio::test]
    async fn test_server_error_is_an_error() {
        let api = fake_price_api().await;
        let err = source(&api).usd_price("BOOM").await.unwrap_err();
        assert!(err.to_string().contains("error status"));
    }
}
