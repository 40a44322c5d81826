pub mod analysis;
pub mod cache;
pub mod comparison;
pub mod enricher;
pub mod fetcher;
pub mod indicators;

pub use cache::Cache;
pub use fetcher::{FetchKey, MarketDataFetcher};
