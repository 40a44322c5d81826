//! Tandem - technical analysis dashboard for a stock index and a commodity

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod render;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use dashboard::DashboardService;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    pub fn new(config: Arc<Config>, dashboard: Arc<DashboardService>) -> Self {
        Self { config, dashboard }
    }
}

/// Build the full application with middleware attached.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
