pub mod dashboard;
pub mod health;
pub mod series;

use crate::AppState;
use axum::Router;

/// Create the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(dashboard::router())
        .nest("/api", series::router())
}
