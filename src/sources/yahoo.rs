//! Yahoo Finance API client for historical OHLC data.
//!
//! Serves both the stock index and the commodity future through the
//! unofficial chart endpoint (no API key required).

use super::BarSource;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::OhlcPoint;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B).
/// Index carets and futures suffixes (^GSPC, GC=F) pass through unchanged.
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Convert a chart response into time-ordered bars.
fn parse_chart(data: YahooChartResponse) -> Result<Vec<OhlcPoint>> {
    if let Some(error) = data.chart.error {
        return Err(AppError::ExternalApi(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let result = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| AppError::ExternalApi("No results in response".to_string()))?;

    let timestamps = result
        .timestamp
        .ok_or_else(|| AppError::ExternalApi("No timestamps in response".to_string()))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| AppError::ExternalApi("No quote data in response".to_string()))?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    fn value(column: &[Option<f64>], i: usize) -> Option<f64> {
        column.get(i).copied().flatten()
    }

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &timestamp) in timestamps.iter().enumerate() {
        // Bars with any missing price are gaps in the provider feed
        let (Some(open), Some(high), Some(low), Some(close)) = (
            value(&opens, i),
            value(&highs, i),
            value(&lows, i),
            value(&closes, i),
        ) else {
            continue;
        };

        if close <= 0.0 {
            continue;
        }

        points.push(OhlcPoint {
            time: timestamp * 1000, // Convert to milliseconds
            open,
            high,
            low,
            close,
            volume: value(&volumes, i),
        });
    }

    Ok(points)
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.yahoo_base_url.clone(), config.request_timeout())
    }

    /// Fetch historical data for a symbol.
    ///
    /// Arguments:
    /// - symbol: Yahoo ticker (e.g., "^GSPC", "GC=F")
    /// - range: Time range ("5d", "1mo", "3mo", "1y", ...)
    /// - interval: Data interval ("15m", "1h", "1d", ...)
    pub async fn get_historical_data(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<OhlcPoint>> {
        let yahoo_symbol = normalize_yahoo_symbol(symbol);
        let url = format!("{}/v8/finance/chart/{}", self.base_url, yahoo_symbol);

        debug!(
            "Fetching Yahoo Finance data: {} range={} interval={}",
            url, range, interval
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("range", range),
                ("interval", interval),
                ("includePrePost", "false"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "API error: {}",
                response.status()
            )));
        }

        let data: YahooChartResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Parse error: {}", e)))?;

        parse_chart(data)
    }
}

#[async_trait]
impl BarSource for YahooFinanceClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_bars(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<OhlcPoint>> {
        self.get_historical_data(symbol, period, interval).await
    }
}
