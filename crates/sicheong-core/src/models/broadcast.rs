use serde::{Deserialize, Serialize};

use crate::error::RowError;

/// Which ranking endpoint a table was scraped from.
///
/// Terrestrial tables are tiered by origin alone; the combined cable table
/// mixes semi-cable and cable channels and is split by channel name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Terrestrial,
    Cable,
}

/// One ranking-table entry, as printed by the ratings source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastRow {
    /// Broadcaster name, unnormalized ("TV조선 (위성)").
    pub channel: String,
    /// Program title as printed, tags and slot labels included.
    pub raw_title: String,
    /// Rating as printed ("9.2%").
    pub rating_text: String,
    /// Rating parsed from `rating_text`, `0.0` when unparseable.
    pub rating_value: f64,
}

impl BroadcastRow {
    pub fn new(
        channel: impl Into<String>,
        raw_title: impl Into<String>,
        rating_text: impl Into<String>,
    ) -> Self {
        let rating_text = rating_text.into();
        Self {
            channel: channel.into(),
            raw_title: raw_title.into(),
            rating_value: parse_rating(&rating_text),
            rating_text,
        }
    }
}

/// A table row as handed over by a scraper. Any cell may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default, alias = "raw_title")]
    pub title: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
}

impl TryFrom<&RawRow> for BroadcastRow {
    type Error = RowError;

    /// A missing channel or title makes the row unusable. A missing rating
    /// degrades to `0.0` like any other unparseable rating.
    fn try_from(raw: &RawRow) -> Result<Self, Self::Error> {
        let channel = non_blank(&raw.channel).ok_or(RowError::MissingField("channel"))?;
        let title = non_blank(&raw.title).ok_or(RowError::MissingField("title"))?;
        let rating = raw.rating.as_deref().unwrap_or("").trim();
        Ok(BroadcastRow::new(channel, title, rating))
    }
}

fn non_blank(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// All rows of one ranking-table fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingTable {
    pub source: Source,
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

/// Parse a printed rating such as `"9.2%"`, `" 12.0 % "` or `"1,234"`.
///
/// Never fails: anything unparseable (or non-finite) is `0.0`.
pub fn parse_rating(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .trim_end_matches('%')
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
