//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::ema;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// MACD columns aligned with the input closes.
///
/// - Line = EMA(fast) - EMA(slow)
/// - Signal = EMA(signal) of the line
/// - Histogram = Line - Signal
#[derive(Debug, Clone, PartialEq)]
pub struct MacdColumns {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdColumns {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    let line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| Some((*f)? - (*s)?))
        .collect();

    // The signal EMA runs over the defined tail of the line only
    let mut signal = vec![None; closes.len()];
    if let Some(start) = line.iter().position(Option::is_some) {
        let defined: Vec<f64> = line[start..].iter().flatten().copied().collect();
        for (offset, value) in ema(&defined, signal_period).into_iter().enumerate() {
            signal[start + offset] = value;
        }
    }

    let histogram = line
        .iter()
        .zip(&signal)
        .map(|(l, s)| Some((*l)? - (*s)?))
        .collect();

    MacdColumns {
        line,
        signal,
        histogram,
    }
}
