use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    cached_series: usize,
    cache_ttl_secs: u64,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let fetcher = state.dashboard.fetcher();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cached_series: fetcher.cached_series(),
        cache_ttl_secs: fetcher.cache_ttl().as_secs(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/health", get(health))
}
