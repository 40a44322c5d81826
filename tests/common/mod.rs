//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tandem::config::Config;
use tandem::dashboard::DashboardService;
use tandem::error::{AppError, Result};
use tandem::services::MarketDataFetcher;
use tandem::sources::BarSource;
use tandem::types::OhlcPoint;
use tandem::AppState;

pub const HOUR_MS: i64 = 3_600_000;

/// Serves deterministic synthetic bars, failing for the listed symbols.
pub struct StubSource {
    pub failing: Vec<String>,
    pub bars: usize,
    pub calls: AtomicUsize,
}

impl StubSource {
    pub fn new(bars: usize) -> Self {
        Self {
            failing: Vec::new(),
            bars,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self, symbol: &str) -> Self {
        self.failing.push(symbol.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BarSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_bars(&self, symbol: &str, _period: &str, _interval: &str) -> Result<Vec<OhlcPoint>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|s| s == symbol) {
            return Err(AppError::ExternalApi(format!("API error: 500 for {}", symbol)));
        }
        Ok(bars(symbol, self.bars))
    }
}

/// Hourly bars following a symbol-specific wave around a rising trend.
pub fn bars(symbol: &str, count: usize) -> Vec<OhlcPoint> {
    let (base, amplitude) = if symbol == "GC=F" { (1900.0, 15.0) } else { (4500.0, 40.0) };
    (0..count)
        .map(|i| {
            let t = i as f64;
            let close = base + (t * 0.3).sin() * amplitude + t * 0.5;
            OhlcPoint {
                time: i as i64 * HOUR_MS,
                open: close - 1.0,
                high: close + 3.0,
                low: close - 3.0,
                close,
                volume: Some(1_000.0 + t),
            }
        })
        .collect()
}

pub fn state_with(source: Arc<StubSource>) -> AppState {
    let config = Arc::new(Config::with_defaults());
    let fetcher = Arc::new(MarketDataFetcher::new(source, Duration::from_secs(60)));
    let dashboard = Arc::new(DashboardService::new(config.clone(), fetcher));
    AppState::new(config, dashboard)
}
