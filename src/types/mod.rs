pub mod asset;
pub mod chart;
pub mod signals;

pub use asset::*;
pub use chart::*;
pub use signals::*;
