//! Integration tests for HTTP endpoints

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use common::{state_with, StubSource};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app(source: StubSource) -> (Router, Arc<StubSource>) {
    let source = Arc::new(source);
    (tandem::app(state_with(source.clone())), source)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (app, _) = app(StubSource::new(120));
    let (status, json) = get_json(&app, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["cachedSeries"], 0);
    assert_eq!(json["cacheTtlSecs"], 60);
}

// =============================================================================
// Series / Analysis
// =============================================================================

#[tokio::test]
async fn test_series_drops_warm_up_rows() {
    let (app, _) = app(StubSource::new(120));
    let (status, json) = get_json(&app, "/api/series/index?interval=1h").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["symbol"], "^GSPC");
    let points = json["data"]["points"].as_array().unwrap();
    assert_eq!(points.len(), 71);
    assert_eq!(points[0]["time"], 49 * common::HOUR_MS);
    assert!(points[0]["bbUpper"].is_number());
    assert_eq!(json["meta"]["cached"], false);
}

#[tokio::test]
async fn test_series_second_request_is_cached() {
    let (app, source) = app(StubSource::new(120));
    get_json(&app, "/api/series/gold").await;
    let (_, json) = get_json(&app, "/api/series/gold").await;

    assert_eq!(json["meta"]["cached"], true);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_series_unknown_asset_is_404() {
    let (app, _) = app(StubSource::new(120));
    let (status, json) = get_json(&app, "/api/series/oil").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"], "Unknown asset: oil");
}

#[tokio::test]
async fn test_series_unknown_interval_is_400() {
    let (app, _) = app(StubSource::new(120));
    let (status, _) = get_json(&app, "/api/series/index?interval=2w").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_series_provider_failure_is_502() {
    let (app, _) = app(StubSource::new(120).failing("^GSPC"));
    let (status, json) = get_json(&app, "/api/series/index").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("^GSPC"));
}

#[tokio::test]
async fn test_analysis_labels() {
    let (app, _) = app(StubSource::new(120));
    let (status, json) = get_json(&app, "/api/analysis/commodity").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    assert_eq!(data["label"], "Gold");
    let rsi = data["snapshot"]["rsi"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&rsi));
    assert!(["overbought", "neutral", "oversold"].contains(&data["rsiZone"].as_str().unwrap()));
    assert!(["bullish", "bearish"].contains(&data["macdTrend"].as_str().unwrap()));
}

#[tokio::test]
async fn test_analysis_short_history_is_null() {
    let (app, _) = app(StubSource::new(40));
    let (status, json) = get_json(&app, "/api/analysis/index").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].is_null());
}

// =============================================================================
// Compare
// =============================================================================

#[tokio::test]
async fn test_compare_computes_correlation() {
    let (app, _) = app(StubSource::new(120));
    let (status, json) = get_json(&app, "/api/compare").await;

    assert_eq!(status, StatusCode::OK);
    let outcome = &json["data"]["outcome"];
    assert_eq!(outcome["status"], "computed");
    assert_eq!(outcome["overlap"], 71);
    let r = outcome["correlation"].as_f64().unwrap();
    assert!((-1.0..=1.0).contains(&r));

    let series = json["data"]["series"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    for s in series {
        assert_eq!(s["points"][0]["value"], 100.0);
    }
}

#[tokio::test]
async fn test_compare_empty_series_is_insufficient() {
    let (app, _) = app(StubSource::new(20));
    let (_, json) = get_json(&app, "/api/compare?interval=1d").await;

    assert_eq!(json["data"]["outcome"]["status"], "insufficient_overlap");
    assert_eq!(json["data"]["outcome"]["overlap"], 0);
}

// =============================================================================
// Dashboard page
// =============================================================================

#[tokio::test]
async fn test_dashboard_page_renders() {
    let (app, _) = app(StubSource::new(120));
    let (status, html) = get(&app, "/?interval=1h&tab=comparison").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Plotly.newPlot(\"chart-index-1\""));
    assert!(html.contains("Plotly.newPlot(\"chart-commodity-1\""));
    assert!(html.contains("Plotly.newPlot(\"chart-comparison-1\""));
    assert!(html.contains(r#"class="tab active" data-tab="comparison""#));
    assert!(html.contains("S&amp;P 500 / Gold correlation"));
}

#[tokio::test]
async fn test_dashboard_unknown_interval_notice() {
    let (app, _) = app(StubSource::new(120));
    let (status, html) = get(&app, "/?interval=7m").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Unknown interval &quot;7m&quot;; showing 1 Hour instead."));
    assert!(html.contains(r#"<option value="1h" selected>"#));
}

#[tokio::test]
async fn test_dashboard_survives_provider_failure() {
    let (app, _) = app(StubSource::new(120).failing("GC=F"));
    let (status, html) = get(&app, "/?tab=commodity").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Error fetching data for GC=F"));
    assert!(html.contains("No data available for Gold (GC=F)"));
    assert!(html.contains("Insufficient overlapping data to compute correlation."));
}
