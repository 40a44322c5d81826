use crate::render::render_dashboard;
use crate::types::{Interval, Tab};
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::debug;

/// Query parameters for the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub interval: Option<String>,
    pub tab: Option<String>,
}

/// Resolve the requested interval, falling back to the default.
///
/// Returns the notice to show when the requested value was rejected.
pub fn resolve_interval(requested: Option<&str>) -> (Interval, Option<String>) {
    match requested {
        None | Some("") => (Interval::default(), None),
        Some(raw) => match Interval::from_str(raw) {
            Some(interval) => (interval, None),
            None => {
                let fallback = Interval::default();
                (
                    fallback,
                    Some(format!(
                        "Unknown interval \"{}\"; showing {} instead.",
                        raw,
                        fallback.label()
                    )),
                )
            }
        },
    }
}

/// GET /
async fn index(State(state): State<AppState>, Query(query): Query<DashboardQuery>) -> Html<String> {
    let (interval, notice) = resolve_interval(query.interval.as_deref());
    let tab = query
        .tab
        .as_deref()
        .and_then(Tab::from_str)
        .unwrap_or_default();

    debug!("Dashboard request: interval={} tab={}", interval.as_str(), tab.slug());

    let mut dashboard = state.dashboard.run(interval, tab).await;
    if let Some(text) = notice {
        dashboard.banner.info(text);
    }

    Html(render_dashboard(&dashboard))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_interval_known() {
        assert_eq!(resolve_interval(Some("4h")), (Interval::FourHours, None));
        assert_eq!(resolve_interval(None), (Interval::OneHour, None));
        assert_eq!(resolve_interval(Some("")), (Interval::OneHour, None));
    }

    #[test]
    fn test_resolve_interval_unknown_falls_back() {
        let (interval, notice) = resolve_interval(Some("7m"));
        assert_eq!(interval, Interval::OneHour);
        assert_eq!(
            notice.unwrap(),
            "Unknown interval \"7m\"; showing 1 Hour instead."
        );
    }
}
