use serde::{Deserialize, Serialize};
use sicheong_parse::TitleElements;
use tracing::debug;

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::MatcherConfig;
use crate::models::BroadcastRow;
use crate::normalize::normalize;
use crate::similarity;

/// How a row was recognized as a drama.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Normalized display title equals a catalog key.
    Exact,
    /// A catalog key appears inside the normalized raw title.
    Containment,
    /// Best LCS ratio against the catalog cleared the threshold.
    Similarity,
    /// Generic drama-format marker, no catalog entry.
    Keyword,
}

impl MatchStrategy {
    /// Strategies in the order they are tried. Structurally certain signals
    /// come before fuzzy ones, and the weak keyword heuristic comes last.
    pub const PRECEDENCE: [MatchStrategy; 4] = [
        Self::Exact,
        Self::Containment,
        Self::Similarity,
        Self::Keyword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Containment => "containment",
            Self::Similarity => "similarity",
            Self::Keyword => "keyword",
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of matching one ranking row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchResult<'a> {
    /// Resolved to a catalog entry with confidence (0.0–1.0).
    Catalog {
        entry: &'a CatalogEntry,
        strategy: MatchStrategy,
        confidence: f64,
    },
    /// Accepted as a drama by its format marker alone.
    Keyword,
    /// Not a drama.
    NoMatch,
}

impl<'a> MatchResult<'a> {
    pub fn entry(&self) -> Option<&'a CatalogEntry> {
        match self {
            Self::Catalog { entry, .. } => Some(*entry),
            _ => None,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Self::Catalog { confidence, .. } => *confidence,
            Self::Keyword => CERTAIN,
            Self::NoMatch => 0.0,
        }
    }

    pub fn strategy(&self) -> Option<MatchStrategy> {
        match self {
            Self::Catalog { strategy, .. } => Some(*strategy),
            Self::Keyword => Some(MatchStrategy::Keyword),
            Self::NoMatch => None,
        }
    }

    pub fn is_drama(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

const CERTAIN: f64 = 1.0;

/// Normalized views of one row, computed once per match.
struct Query<'q> {
    raw_title: &'q str,
    /// `normalize(extract_display_title(raw))`
    title_key: String,
    /// `normalize(raw)`
    raw_key: String,
    elements: &'q TitleElements,
}

/// Resolves ranking rows against a catalog snapshot.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    catalog: &'a Catalog,
    similarity_threshold: f64,
    min_containment_len: usize,
    exclude_keys: Vec<String>,
}

impl<'a> Matcher<'a> {
    pub fn new(catalog: &'a Catalog, config: &MatcherConfig) -> Self {
        Self {
            catalog,
            similarity_threshold: config.similarity_threshold,
            min_containment_len: config.min_containment_len,
            exclude_keys: Vec::new(),
        }
    }

    /// Rows containing any of these keywords never pass the keyword fallback.
    pub fn with_exclusions<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        self.exclude_keys = keywords
            .iter()
            .map(|k| normalize(k.as_ref()))
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Parse and match a row.
    pub fn match_row(&self, row: &BroadcastRow) -> MatchResult<'a> {
        let elements = sicheong_parse::parse(&row.raw_title);
        self.match_parsed(&row.raw_title, &elements)
    }

    /// Match a row whose title has already been parsed.
    ///
    /// Strategies run in [`MatchStrategy::PRECEDENCE`] order; the first one
    /// that succeeds decides.
    pub fn match_parsed(&self, raw_title: &str, elements: &TitleElements) -> MatchResult<'a> {
        let query = Query {
            raw_title,
            title_key: normalize(&elements.display_title),
            raw_key: normalize(raw_title),
            elements,
        };

        for strategy in MatchStrategy::PRECEDENCE {
            if let Some(result) = self.attempt(strategy, &query) {
                debug!(
                    raw_title,
                    %strategy,
                    confidence = result.confidence(),
                    "Drama matched"
                );
                return result;
            }
        }

        debug!(raw_title, "No drama match");
        MatchResult::NoMatch
    }

    fn attempt(&self, strategy: MatchStrategy, query: &Query<'_>) -> Option<MatchResult<'a>> {
        match strategy {
            MatchStrategy::Exact => self.exact(query),
            MatchStrategy::Containment => self.containment(query),
            MatchStrategy::Similarity => self.similarity(query),
            MatchStrategy::Keyword => self.keyword(query),
        }
    }

    fn exact(&self, query: &Query<'_>) -> Option<MatchResult<'a>> {
        if query.title_key.is_empty() {
            return None;
        }
        self.catalog
            .get(&query.title_key)
            .map(|entry| MatchResult::Catalog {
                entry,
                strategy: MatchStrategy::Exact,
                confidence: CERTAIN,
            })
    }

    /// Longest contained key wins; equal lengths go to the smallest key.
    fn containment(&self, query: &Query<'_>) -> Option<MatchResult<'a>> {
        let catalog: &'a Catalog = self.catalog;
        catalog
            .iter()
            .filter(|entry| {
                entry.key.chars().count() >= self.min_containment_len
                    && query.raw_key.contains(entry.key.as_str())
            })
            .max_by(|a, b| {
                a.key
                    .chars()
                    .count()
                    .cmp(&b.key.chars().count())
                    .then_with(|| b.key.cmp(&a.key))
            })
            .map(|entry| MatchResult::Catalog {
                entry,
                strategy: MatchStrategy::Containment,
                confidence: CERTAIN,
            })
    }

    /// Best LCS ratio over the whole catalog; the first key in key order
    /// keeps a tie.
    fn similarity(&self, query: &Query<'_>) -> Option<MatchResult<'a>> {
        if query.title_key.is_empty() {
            return None;
        }
        let catalog: &'a Catalog = self.catalog;
        let mut best: Option<(&'a CatalogEntry, f64)> = None;
        for entry in catalog.iter() {
            let score = similarity::ratio(&query.title_key, &entry.key);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((entry, score));
            }
        }

        let (entry, score) = best?;
        if score >= self.similarity_threshold {
            Some(MatchResult::Catalog {
                entry,
                strategy: MatchStrategy::Similarity,
                confidence: score,
            })
        } else {
            debug!(
                raw_title = query.raw_title,
                closest = %entry.key,
                score,
                "Best similarity below threshold"
            );
            None
        }
    }

    fn keyword(&self, query: &Query<'_>) -> Option<MatchResult<'a>> {
        let marker = query.elements.drama_format.as_deref()?;
        if let Some(excluded) = self
            .exclude_keys
            .iter()
            .find(|k| query.raw_key.contains(k.as_str()))
        {
            debug!(raw_title = query.raw_title, marker, %excluded, "Keyword fallback excluded");
            return None;
        }
        Some(MatchResult::Keyword)
    }
}

/// Match a row against a catalog with the default thresholds and no exclusions.
pub fn match_row<'a>(row: &BroadcastRow, catalog: &'a Catalog) -> MatchResult<'a> {
    Matcher::new(catalog, &MatcherConfig::default()).match_row(row)
}
