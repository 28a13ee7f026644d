use serde::{Deserialize, Serialize};

use super::broadcast::BroadcastRow;
use crate::matcher::MatchStrategy;

/// Channel grouping used for separate top-N reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Terrestrial,
    SemiCable,
    Cable,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Terrestrial => "Terrestrial",
            Self::SemiCable => "Semi-cable",
            Self::Cable => "Cable",
        }
    }

    /// Heading used by Korean digests.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Terrestrial => "지상파",
            Self::SemiCable => "종편",
            Self::Cable => "케이블",
        }
    }

    pub const ALL: &[Tier] = &[Self::Terrestrial, Self::SemiCable, Self::Cable];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranking row resolved to a drama.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRow {
    #[serde(flatten)]
    pub row: BroadcastRow,
    /// Title for presentation, rerun marker included when applicable.
    pub display_title: String,
    pub is_rerun: bool,
    pub tier: Tier,
    /// 1.0 for exact, containment and keyword matches; the similarity ratio otherwise.
    pub match_confidence: f64,
    pub strategy: MatchStrategy,
    /// Catalog key the row resolved to; `None` for keyword matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_key: Option<String>,
}

impl MatchedRow {
    pub fn rating_value(&self) -> f64 {
        self.row.rating_value
    }
}
