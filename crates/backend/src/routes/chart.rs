use axum::{Json, Router, extract::Path, routing::get};
use chainfolio_core::chart::{ChartSeries, synthetic_series};
use tracing::info;

use crate::state::AppState;

pub async fn get_chart(Path(symbol): Path<String>) -> Json<ChartSeries> {
    info!(%symbol, "Building chart");
    Json(synthetic_series(&symbol))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/:symbol", get(get_chart))
}
