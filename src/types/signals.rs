use serde::{Deserialize, Serialize};

use super::EnrichedPoint;

/// RSI zone of the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Overbought,
    Neutral,
    Oversold,
}

impl RsiZone {
    /// Get display label for this zone.
    pub fn label(&self) -> &'static str {
        match self {
            RsiZone::Overbought => "overbought",
            RsiZone::Neutral => "neutral",
            RsiZone::Oversold => "oversold",
        }
    }
}

/// Direction of a two-line trend comparison (MACD vs signal, MA-20 vs MA-50).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Bullish,
    Bearish,
}

impl TrendDirection {
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Bullish => "bullish",
            TrendDirection::Bearish => "bearish",
        }
    }
}

/// Indicator values of the final enriched row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub time: i64,
    pub close: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub ma20: f64,
    pub ma50: f64,
}

impl From<&EnrichedPoint> for IndicatorSnapshot {
    fn from(point: &EnrichedPoint) -> Self {
        Self {
            time: point.bar.time,
            close: point.bar.close,
            rsi: point.rsi,
            macd: point.macd,
            macd_signal: point.macd_signal,
            ma20: point.ma20,
            ma50: point.ma50,
        }
    }
}

/// Classification panel for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub label: String,
    pub snapshot: IndicatorSnapshot,
    pub rsi_zone: RsiZone,
    pub macd_trend: TrendDirection,
    pub ma_trend: TrendDirection,
}

/// How two assets move relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoMovement {
    PositiveCoMovement,
    NegativeCoMovement,
    NoClearRelationship,
}

impl CoMovement {
    pub fn label(&self) -> &'static str {
        match self {
            CoMovement::PositiveCoMovement => "positive co-movement",
            CoMovement::NegativeCoMovement => "negative co-movement",
            CoMovement::NoClearRelationship => "no clear relationship",
        }
    }
}

/// Result of correlating two enriched series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Computed {
        correlation: f64,
        co_movement: CoMovement,
        overlap: usize,
    },
    InsufficientOverlap {
        overlap: usize,
    },
}

/// Close rebased to 100 at the first observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub time: i64,
    pub value: f64,
}
