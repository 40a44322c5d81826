//! Read-through cached access to provider bars.

use crate::error::Result;
use crate::render::Section;
use crate::services::Cache;
use crate::sources::BarSource;
use crate::types::{Interval, OhlcPoint, PriceSeries};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Cache key: one entry per distinct provider query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub symbol: String,
    pub period: &'static str,
    pub interval: &'static str,
}

impl FetchKey {
    pub fn new(symbol: &str, interval: Interval) -> Self {
        Self {
            symbol: symbol.to_string(),
            period: interval.period(),
            interval: interval.as_str(),
        }
    }
}

/// Fetches price series through a short-lived cache.
pub struct MarketDataFetcher {
    source: Arc<dyn BarSource>,
    cache: Cache<FetchKey, PriceSeries>,
}

impl MarketDataFetcher {
    pub fn new(source: Arc<dyn BarSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: Cache::new(ttl),
        }
    }

    /// Fetch a series, serving from cache when a live entry exists.
    ///
    /// Only successful responses are cached; a failure is returned as-is and
    /// the next call goes back to the provider.
    pub async fn fetch(&self, symbol: &str, interval: Interval) -> Result<PriceSeries> {
        let key = FetchKey::new(symbol, interval);
        if let Some(series) = self.cache.get(&key) {
            debug!("Cache hit for {} {} {}", key.symbol, key.period, key.interval);
            return Ok(series);
        }

        let bars = self
            .source
            .fetch_bars(symbol, interval.period(), interval.provider_interval())
            .await?;

        let bars = match interval.resample_seconds() {
            Some(bucket_seconds) => resample(&bars, bucket_seconds),
            None => bars,
        };

        debug!(
            "Fetched {} bars for {} from {}",
            bars.len(),
            symbol,
            self.source.name()
        );

        let series = PriceSeries::new(symbol, bars);
        self.cache.set(key, series.clone());
        Ok(series)
    }

    /// Fetch a series, converting any provider failure into an error notice
    /// and an empty series.
    pub async fn fetch_or_report(
        &self,
        symbol: &str,
        interval: Interval,
        section: &mut Section,
    ) -> PriceSeries {
        match self.fetch(symbol, interval).await {
            Ok(series) => series,
            Err(e) => {
                warn!("Failed to fetch {} ({}): {}", symbol, interval.as_str(), e);
                section.error(format!("Error fetching data for {}: {}", symbol, e));
                PriceSeries::empty(symbol)
            }
        }
    }

    /// Whether a live cache entry exists for this query.
    pub fn is_cached(&self, symbol: &str, interval: Interval) -> bool {
        self.cache.get(&FetchKey::new(symbol, interval)).is_some()
    }

    /// Number of cached series (including expired, not yet evicted).
    pub fn cached_series(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }

    /// Drop expired cache entries.
    pub fn cleanup(&self) {
        self.cache.cleanup();
    }
}

/// OHLC bucket for a resampling period.
struct OhlcBucket {
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: Option<f64>,
}

impl OhlcBucket {
    fn new(time: i64, bar: &OhlcPoint) -> Self {
        Self {
            time,
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }

    fn update(&mut self, bar: &OhlcPoint) {
        self.high = self.high.max(bar.high);
        self.low = self.low.min(bar.low);
        self.close = bar.close;
        if let Some(v) = bar.volume {
            self.volume = Some(self.volume.unwrap_or(0.0) + v);
        }
    }

    fn into_point(self) -> OhlcPoint {
        OhlcPoint {
            time: self.time,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }
}

/// Aggregate time-ordered bars into epoch-aligned buckets of `bucket_seconds`.
pub fn resample(bars: &[OhlcPoint], bucket_seconds: i64) -> Vec<OhlcPoint> {
    let bucket_ms = bucket_seconds * 1000;
    let mut out = Vec::new();
    let mut current: Option<OhlcBucket> = None;

    for bar in bars {
        let bucket_time = bar.time.div_euclid(bucket_ms) * bucket_ms;

        if let Some(bucket) = current.as_mut() {
            if bucket.time == bucket_time {
                bucket.update(bar);
                continue;
            }
        }

        if let Some(done) = current.replace(OhlcBucket::new(bucket_time, bar)) {
            out.push(done.into_point());
        }
    }

    if let Some(done) = current {
        out.push(done.into_point());
    }

    out
}
