//! Column-wise technical indicator implementations.
//!
//! Every function returns one value per input element, `None` while the
//! indicator is still inside its warm-up window.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{bollinger, BollingerColumns, BOLLINGER_PERIOD, BOLLINGER_STD_DEV};
pub use ema::ema;
pub use macd::{macd, MacdColumns, MACD_FAST, MACD_SIGNAL, MACD_SLOW};
pub use rsi::{rsi, RSI_PERIOD};
pub use sma::sma;
