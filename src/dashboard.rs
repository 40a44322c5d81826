//! One dashboard interaction: fetch, enrich, render and analyse each asset,
//! then compare them.

use crate::config::Config;
use crate::render::{render_chart, Section};
use crate::services::analysis::render_analysis;
use crate::services::comparison::render_comparison;
use crate::services::enricher::enrich;
use crate::services::MarketDataFetcher;
use crate::types::{Asset, EnrichedSeries, Interval, Tab};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Fully rendered state of one request.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub interval: Interval,
    pub active_tab: Tab,
    pub index: Section,
    pub commodity: Section,
    pub comparison: Section,
    /// Notices shown above the tab bar (e.g. rejected query values).
    pub banner: Section,
    pub generated_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn section(&self, tab: Tab) -> &Section {
        match tab {
            Tab::Index => &self.index,
            Tab::Commodity => &self.commodity,
            Tab::Comparison => &self.comparison,
        }
    }
}

/// Runs the per-request pipeline over the shared fetcher.
pub struct DashboardService {
    config: Arc<Config>,
    fetcher: Arc<MarketDataFetcher>,
}

impl DashboardService {
    pub fn new(config: Arc<Config>, fetcher: Arc<MarketDataFetcher>) -> Self {
        Self { config, fetcher }
    }

    pub fn fetcher(&self) -> &Arc<MarketDataFetcher> {
        &self.fetcher
    }

    pub fn symbol(&self, asset: Asset) -> &str {
        self.config.symbol_for(asset)
    }

    /// Chart title for an asset, e.g. "S&P 500 (^GSPC)".
    pub fn title(&self, asset: Asset) -> String {
        format!("{} ({})", asset.label(), self.symbol(asset))
    }

    /// Fetch and enrich one asset, reporting failures into `section`.
    pub async fn load(
        &self,
        asset: Asset,
        interval: Interval,
        section: &mut Section,
    ) -> EnrichedSeries {
        let raw = self
            .fetcher
            .fetch_or_report(self.symbol(asset), interval, section)
            .await;
        let enriched = enrich(&raw);
        debug!(
            "{}: {} raw bars, {} enriched rows",
            asset.label(),
            raw.len(),
            enriched.len()
        );
        enriched
    }

    /// Execute the whole dashboard top to bottom.
    pub async fn run(&self, interval: Interval, active_tab: Tab) -> Dashboard {
        let mut loaded: HashMap<Asset, EnrichedSeries> = HashMap::new();
        let mut index = Section::new();
        let mut commodity = Section::new();

        for asset in Asset::ALL {
            let section = match asset {
                Asset::Index => &mut index,
                Asset::Commodity => &mut commodity,
            };

            let enriched = self.load(asset, interval, section).await;
            render_chart(&enriched, &self.title(asset), section);
            render_analysis(&enriched, asset.label(), section);
            loaded.insert(asset, enriched);
        }

        let mut comparison = Section::new();
        render_comparison(
            loaded.get(&Asset::Index).map(|s| (Asset::Index.label(), s)),
            loaded
                .get(&Asset::Commodity)
                .map(|s| (Asset::Commodity.label(), s)),
            &mut comparison,
        );

        Dashboard {
            interval,
            active_tab,
            index,
            commodity,
            comparison,
            banner: Section::new(),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::render::{Block, NoticeLevel};
    use crate::sources::BarSource;
    use crate::types::OhlcPoint;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Serves `bars` synthetic hourly bars, failing for the listed symbols.
    struct StubSource {
        failing: Vec<String>,
        bars: usize,
    }

    #[async_trait]
    impl BarSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        async fn fetch_bars(
            &self,
            symbol: &str,
            _period: &str,
            _interval: &str,
        ) -> Result<Vec<OhlcPoint>> {
            if self.failing.iter().any(|s| s == symbol) {
                return Err(AppError::ExternalApi("API error: 404 Not Found".to_string()));
            }
            let offset = if symbol == "GC=F" { 1900.0 } else { 4500.0 };
            Ok((0..self.bars)
                .map(|i| {
                    let close = offset + (i as f64 * 0.25).sin() * 20.0 + i as f64;
                    OhlcPoint {
                        time: i as i64 * 3_600_000,
                        open: close - 1.0,
                        high: close + 2.0,
                        low: close - 2.0,
                        close,
                        volume: Some(1000.0),
                    }
                })
                .collect())
        }
    }

    fn service(failing: &[&str], bars: usize) -> DashboardService {
        let source = Arc::new(StubSource {
            failing: failing.iter().map(|s| s.to_string()).collect(),
            bars,
        });
        let fetcher = Arc::new(MarketDataFetcher::new(source, Duration::from_secs(60)));
        DashboardService::new(Arc::new(Config::with_defaults()), fetcher)
    }

    #[tokio::test]
    async fn test_run_renders_every_view() {
        let dashboard = service(&[], 120).run(Interval::OneHour, Tab::Comparison).await;

        for section in [&dashboard.index, &dashboard.commodity] {
            assert_eq!(section.charts().len(), 1);
            assert!(section
                .blocks
                .iter()
                .any(|b| matches!(b, Block::Analysis(_))));
            assert!(section.notices(NoticeLevel::Error).is_empty());
        }

        assert_eq!(dashboard.comparison.charts().len(), 1);
        assert!(dashboard
            .comparison
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Metric { .. })));
        assert_eq!(dashboard.active_tab, Tab::Comparison);
    }

    #[tokio::test]
    async fn test_run_degrades_on_provider_failure() {
        let dashboard = service(&["^GSPC"], 120).run(Interval::OneHour, Tab::Index).await;

        let errors = dashboard.index.notices(NoticeLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("^GSPC"));
        assert_eq!(
            dashboard.index.notices(NoticeLevel::Warning),
            vec!["No data available for S&P 500 (^GSPC)"]
        );
        assert!(dashboard.index.charts().is_empty());

        // Commodity view is unaffected
        assert_eq!(dashboard.commodity.charts().len(), 1);

        // Empty index series leaves no overlap to correlate
        assert_eq!(
            dashboard.comparison.notices(NoticeLevel::Warning),
            vec!["Insufficient overlapping data to compute correlation."]
        );
    }

    #[tokio::test]
    async fn test_run_short_history() {
        let dashboard = service(&[], 30).run(Interval::OneHour, Tab::Index).await;

        assert!(dashboard.index.charts().is_empty());
        assert_eq!(dashboard.index.notices(NoticeLevel::Warning).len(), 1);
        assert!(!dashboard
            .index
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Analysis(_))));
    }

    #[test]
    fn test_titles_use_configured_symbols() {
        let service = service(&[], 0);
        assert_eq!(service.title(Asset::Index), "S&P 500 (^GSPC)");
        assert_eq!(service.title(Asset::Commodity), "Gold (GC=F)");
    }
}
