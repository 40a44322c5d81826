pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use crate::error::Result;
use crate::types::OhlcPoint;
use async_trait::async_trait;

/// A provider of historical OHLC bars.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// Fetch bars for a symbol over a lookback period at a sampling interval.
    async fn fetch_bars(&self, symbol: &str, period: &str, interval: &str)
        -> Result<Vec<OhlcPoint>>;
}
