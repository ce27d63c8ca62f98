use std::str::FromStr as _;

use alloy_primitives::Address;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::{info, warn};

use crate::{
    models::{ErrorResponse, PortfolioResponse},
    state::AppState,
};

pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<PortfolioResponse>, (StatusCode, Json<ErrorResponse>)> {
    let address = Address::from_str(address.trim()).map_err(|e| {
        warn!(%address, error = %e, "Rejected portfolio request");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!("invalid wallet address: {e}"))),
        )
    })?;

    info!(%address, "Fetching portfolio");
    let portfolio = state.aggregator.run(address).await;

    Ok(Json(portfolio.into()))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/:address", get(get_portfolio))
}
