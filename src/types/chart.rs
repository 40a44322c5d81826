use serde::{Deserialize, Serialize};

/// Sampling interval offered by the dashboard's interval selector.
///
/// Each interval implies a fixed lookback period so that the series is long
/// enough to clear the 50-bar warm-up of the slowest moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    pub const ALL: [Interval; 4] = [
        Interval::FifteenMinutes,
        Interval::OneHour,
        Interval::FourHours,
        Interval::OneDay,
    ];

    /// Parse from the query value used by the selector.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "15m" => Some(Interval::FifteenMinutes),
            "1h" => Some(Interval::OneHour),
            "4h" => Some(Interval::FourHours),
            "1d" => Some(Interval::OneDay),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::FifteenMinutes => "15m",
            Interval::OneHour => "1h",
            Interval::FourHours => "4h",
            Interval::OneDay => "1d",
        }
    }

    /// Get display label for this interval.
    pub fn label(&self) -> &'static str {
        match self {
            Interval::FifteenMinutes => "15 Minutes",
            Interval::OneHour => "1 Hour",
            Interval::FourHours => "4 Hours",
            Interval::OneDay => "1 Day",
        }
    }

    /// Lookback period requested from the provider.
    pub fn period(&self) -> &'static str {
        match self {
            Interval::FifteenMinutes => "5d",
            Interval::OneHour => "1mo",
            Interval::FourHours => "3mo",
            Interval::OneDay => "1y",
        }
    }

    /// Interval string sent to the provider.
    /// Yahoo has no native 4h bars, so those are built from 1h bars.
    pub fn provider_interval(&self) -> &'static str {
        match self {
            Interval::FifteenMinutes => "15m",
            Interval::OneHour | Interval::FourHours => "1h",
            Interval::OneDay => "1d",
        }
    }

    /// Bucket size in seconds when bars must be resampled after fetching.
    ///
    /// Daily bars are floored to their UTC date: the provider stamps each
    /// one at its exchange's session open, which differs between assets.
    pub fn resample_seconds(&self) -> Option<i64> {
        match self {
            Interval::FourHours => Some(4 * 3600),
            Interval::OneDay => Some(24 * 3600),
            Interval::FifteenMinutes | Interval::OneHour => None,
        }
    }
}

/// OHLC (Open, High, Low, Close) data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// Time-ordered bars for one symbol as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<OhlcPoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<OhlcPoint>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}

/// A bar together with every derived indicator value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPoint {
    #[serde(flatten)]
    pub bar: OhlcPoint,
    pub ma20: f64,
    pub ma50: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub macd_hist: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
}

/// Price series with indicator columns; always a time suffix of its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSeries {
    pub symbol: String,
    pub points: Vec<EnrichedPoint>,
}

impl EnrichedSeries {
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent row, used for the analysis panel.
    pub fn last(&self) -> Option<&EnrichedPoint> {
        self.points.last()
    }
}
