use serde::{Deserialize, Serialize};

/// One of the two tracked instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asset {
    /// Stock index (S&P 500 by default).
    Index,
    /// Commodity future (gold by default).
    Commodity,
}

impl Asset {
    pub const ALL: [Asset; 2] = [Asset::Index, Asset::Commodity];

    /// Parse from the URL slug.
    pub fn from_slug(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "index" | "sp500" => Some(Self::Index),
            "commodity" | "gold" => Some(Self::Commodity),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Commodity => "commodity",
        }
    }

    /// Get display name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Index => "S&P 500",
            Self::Commodity => "Gold",
        }
    }
}

/// Dashboard view selected by the tab bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Index,
    Commodity,
    Comparison,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Index, Tab::Commodity, Tab::Comparison];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "index" => Some(Self::Index),
            "commodity" => Some(Self::Commodity),
            "comparison" | "compare" => Some(Self::Comparison),
            _ => None,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Commodity => "commodity",
            Self::Comparison => "comparison",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Index => "S&P 500",
            Self::Commodity => "Gold",
            Self::Comparison => "Comparison",
        }
    }
}
