use axum::{Json, Router, extract::State, routing::get};
use chainfolio_core::chain::Chain;

use crate::state::AppState;

pub async fn get_chains(State(state): State<AppState>) -> Json<Vec<Chain>> {
    Json(state.chains().to_vec())
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_chains))
}
