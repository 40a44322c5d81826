use crate::error::{AppError, Result};
use crate::services::analysis::summarize;
use crate::services::comparison::{compare, normalize};
use crate::services::enricher::enrich;
use crate::types::{AnalysisSummary, Asset, ComparisonOutcome, EnrichedSeries, Interval, NormalizedPoint};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize)]
pub struct ApiMeta {
    pub cached: bool,
}

#[derive(Debug, Deserialize)]
pub struct IntervalQuery {
    pub interval: Option<String>,
}

impl IntervalQuery {
    /// Parse the interval; absent means the default, unknown is rejected.
    fn interval(&self) -> Result<Interval> {
        match self.interval.as_deref() {
            None | Some("") => Ok(Interval::default()),
            Some(raw) => Interval::from_str(raw)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown interval: {}", raw))),
        }
    }
}

fn parse_asset(slug: &str) -> Result<Asset> {
    Asset::from_slug(slug).ok_or_else(|| AppError::NotFound(format!("Unknown asset: {}", slug)))
}

/// Fetch and enrich one asset, noting whether the bars came from cache.
async fn load(state: &AppState, asset: Asset, interval: Interval) -> Result<(EnrichedSeries, bool)> {
    let symbol = state.dashboard.symbol(asset);
    let fetcher = state.dashboard.fetcher();
    let cached = fetcher.is_cached(symbol, interval);
    let raw = fetcher.fetch(symbol, interval).await?;
    Ok((enrich(&raw), cached))
}

/// GET /api/series/:asset
async fn get_series(
    State(state): State<AppState>,
    Path(asset): Path<String>,
    Query(query): Query<IntervalQuery>,
) -> Result<Json<ApiResponse<EnrichedSeries>>> {
    let asset = parse_asset(&asset)?;
    let (series, cached) = load(&state, asset, query.interval()?).await?;
    Ok(Json(ApiResponse {
        data: series,
        meta: ApiMeta { cached },
    }))
}

/// GET /api/analysis/:asset
async fn get_analysis(
    State(state): State<AppState>,
    Path(asset): Path<String>,
    Query(query): Query<IntervalQuery>,
) -> Result<Json<ApiResponse<Option<AnalysisSummary>>>> {
    let asset = parse_asset(&asset)?;
    let (series, cached) = load(&state, asset, query.interval()?).await?;
    Ok(Json(ApiResponse {
        data: summarize(&series, asset.label()),
        meta: ApiMeta { cached },
    }))
}

/// A rebased series in the comparison response.
#[derive(Debug, Serialize)]
pub struct NormalizedSeries {
    pub asset: Asset,
    pub label: &'static str,
    pub points: Vec<NormalizedPoint>,
}

#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub outcome: ComparisonOutcome,
    pub series: Vec<NormalizedSeries>,
}

/// GET /api/compare
async fn get_compare(
    State(state): State<AppState>,
    Query(query): Query<IntervalQuery>,
) -> Result<Json<ApiResponse<ComparisonResponse>>> {
    let interval = query.interval()?;
    let (index, index_cached) = load(&state, Asset::Index, interval).await?;
    let (commodity, commodity_cached) = load(&state, Asset::Commodity, interval).await?;

    let series = vec![
        NormalizedSeries {
            asset: Asset::Index,
            label: Asset::Index.label(),
            points: normalize(&index),
        },
        NormalizedSeries {
            asset: Asset::Commodity,
            label: Asset::Commodity.label(),
            points: normalize(&commodity),
        },
    ];

    Ok(Json(ApiResponse {
        data: ComparisonResponse {
            outcome: compare(&index, &commodity),
            series,
        },
        meta: ApiMeta {
            cached: index_cached && commodity_cached,
        },
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/series/:asset", get(get_series))
        .route("/analysis/:asset", get(get_analysis))
        .route("/compare", get(get_compare))
}
