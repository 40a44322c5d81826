//! Classifies the latest indicator values into display labels.

use crate::render::{Block, Section};
use crate::types::{AnalysisSummary, EnrichedSeries, IndicatorSnapshot, RsiZone, TrendDirection};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;

/// RSI above 70 is overbought, below 30 oversold; both bounds are neutral.
pub fn classify_rsi(rsi: f64) -> RsiZone {
    if rsi > RSI_OVERBOUGHT {
        RsiZone::Overbought
    } else if rsi < RSI_OVERSOLD {
        RsiZone::Oversold
    } else {
        RsiZone::Neutral
    }
}

/// Bullish only when the MACD line is strictly above its signal.
pub fn classify_macd(line: f64, signal: f64) -> TrendDirection {
    if line > signal {
        TrendDirection::Bullish
    } else {
        TrendDirection::Bearish
    }
}

/// Bullish only when MA-20 is strictly above MA-50.
pub fn classify_ma(ma20: f64, ma50: f64) -> TrendDirection {
    if ma20 > ma50 {
        TrendDirection::Bullish
    } else {
        TrendDirection::Bearish
    }
}

/// Summarize the final row, or `None` for an empty series.
pub fn summarize(series: &EnrichedSeries, label: &str) -> Option<AnalysisSummary> {
    let snapshot = IndicatorSnapshot::from(series.last()?);

    Some(AnalysisSummary {
        label: label.to_string(),
        rsi_zone: classify_rsi(snapshot.rsi),
        macd_trend: classify_macd(snapshot.macd, snapshot.macd_signal),
        ma_trend: classify_ma(snapshot.ma20, snapshot.ma50),
        snapshot,
    })
}

/// Add the analysis panel for `series`; adds nothing when it is empty.
pub fn render_analysis(series: &EnrichedSeries, label: &str, section: &mut Section) {
    if let Some(summary) = summarize(series, label) {
        section.push(Block::Analysis(summary));
    }
}
