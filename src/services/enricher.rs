//! Appends indicator columns to a price series.

use crate::services::indicators::{
    bollinger, macd, rsi, sma, BOLLINGER_PERIOD, BOLLINGER_STD_DEV, MACD_FAST, MACD_SIGNAL,
    MACD_SLOW, RSI_PERIOD,
};
use crate::types::{EnrichedPoint, EnrichedSeries, PriceSeries};

pub const SHORT_MA_PERIOD: usize = 20;
pub const LONG_MA_PERIOD: usize = 50;

/// Longest warm-up among the enriched columns.
pub const WARM_UP_BARS: usize = LONG_MA_PERIOD;

/// Compute MA-20, MA-50, RSI-14, MACD and Bollinger columns and keep only the
/// rows where every column is defined.
///
/// Warm-up windows are all leading, so the result is a contiguous time suffix
/// of the input (empty when the input is shorter than [`WARM_UP_BARS`]).
pub fn enrich(series: &PriceSeries) -> EnrichedSeries {
    if series.is_empty() {
        return EnrichedSeries::empty(series.symbol.clone());
    }

    let closes = series.closes();
    let ma20 = sma(&closes, SHORT_MA_PERIOD);
    let ma50 = sma(&closes, LONG_MA_PERIOD);
    let rsi14 = rsi(&closes, RSI_PERIOD);
    let macd_columns = macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
    let bands = bollinger(&closes, BOLLINGER_PERIOD, BOLLINGER_STD_DEV);

    let points = series
        .bars
        .iter()
        .enumerate()
        .filter_map(|(i, bar)| {
            Some(EnrichedPoint {
                bar: bar.clone(),
                ma20: ma20[i]?,
                ma50: ma50[i]?,
                rsi: rsi14[i]?,
                macd: macd_columns.line[i]?,
                macd_signal: macd_columns.signal[i]?,
                macd_hist: macd_columns.histogram[i]?,
                bb_upper: bands.upper[i]?,
                bb_lower: bands.lower[i]?,
            })
        })
        .collect();

    EnrichedSeries {
        symbol: series.symbol.clone(),
        points,
    }
}
