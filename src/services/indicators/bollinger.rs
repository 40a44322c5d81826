//! Bollinger Bands indicator.

pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;

/// Band columns aligned with the input closes.
///
/// - Middle band: SMA(period)
/// - Upper band: SMA + multiplier * StdDev
/// - Lower band: SMA - multiplier * StdDev
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerColumns {
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Population standard deviation around `mean`.
fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance: f64 =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

pub fn bollinger(closes: &[f64], period: usize, multiplier: f64) -> BollingerColumns {
    let len = closes.len();
    let mut columns = BollingerColumns {
        middle: vec![None; len],
        upper: vec![None; len],
        lower: vec![None; len],
    };
    if period == 0 {
        return columns;
    }

    for end in period..=len {
        let window = &closes[end - period..end];
        let middle = window.iter().sum::<f64>() / period as f64;
        let width = multiplier * std_dev(window, middle);

        let i = end - 1;
        columns.middle[i] = Some(middle);
        columns.upper[i] = Some(middle + width);
        columns.lower[i] = Some(middle - width);
    }

    columns
}
