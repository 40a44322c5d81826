//! Display surface for the dashboard.
//!
//! Pipeline stages write [`Block`]s into a [`Section`] (one per tab); the page
//! module turns finished sections into HTML.

pub mod chart;
pub mod page;

pub use chart::{render_chart, render_normalized_chart, ChartSpec};
pub use page::render_dashboard;

use crate::types::AnalysisSummary;
use serde::Serialize;

/// Severity of a user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice-info",
            NoticeLevel::Warning => "notice-warning",
            NoticeLevel::Error => "notice-error",
        }
    }
}

/// One rendered element of a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Notice {
        level: NoticeLevel,
        text: String,
    },
    Chart(ChartSpec),
    Analysis(AnalysisSummary),
    Metric {
        label: String,
        value: String,
        caption: String,
    },
}

/// Ordered blocks rendered for one dashboard view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notice(NoticeLevel::Info, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.notice(NoticeLevel::Warning, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notice(NoticeLevel::Error, text);
    }

    fn notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.blocks.push(Block::Notice {
            level,
            text: text.into(),
        });
    }

    /// Messages of the given level, in insertion order.
    pub fn notices(&self, level: NoticeLevel) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Notice { level: l, text } if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn charts(&self) -> Vec<&ChartSpec> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Chart(spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_notices_by_level() {
        let mut section = Section::new();
        section.info("loading");
        section.error("provider down");
        section.warning("short history");
        section.error("second failure");

        assert_eq!(section.notices(NoticeLevel::Error), vec!["provider down", "second failure"]);
        assert_eq!(section.notices(NoticeLevel::Info), vec!["loading"]);
        assert!(section.charts().is_empty());
    }

    #[test]
    fn test_block_serialization() {
        let block = Block::Notice {
            level: NoticeLevel::Warning,
            text: "No data".to_string(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["kind"], "notice");
        assert_eq!(json["level"], "warning");
    }
}
