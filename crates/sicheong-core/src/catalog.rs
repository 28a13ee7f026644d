//! Reference catalog of known drama titles and their airing weekdays.
//!
//! The catalog is assembled by a scrape collaborator from a manual title list
//! plus an optional scraped supplementary list, then handed to the engine as
//! a read-only snapshot for one scrape cycle.

use std::collections::btree_map::{self, BTreeMap};
use std::path::Path;

use bitflags::bitflags;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SicheongError;
use crate::normalize::normalize;

bitflags! {
    /// Set of weekdays a drama airs on. Index 0 is Monday.
    ///
    /// An empty set means "schedule unknown", never "airs on no day".
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AirDays: u8 {
        const MON = 1 << 0;
        const TUE = 1 << 1;
        const WED = 1 << 2;
        const THU = 1 << 3;
        const FRI = 1 << 4;
        const SAT = 1 << 5;
        const SUN = 1 << 6;
    }
}

impl AirDays {
    /// Day for a weekday index (0 = Monday .. 6 = Sunday).
    pub fn from_index(index: u8) -> Option<Self> {
        (index < 7).then(|| Self::from_bits_truncate(1 << index))
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        Self::from_bits_truncate(1 << weekday.num_days_from_monday())
    }

    /// Collect weekday indices, skipping (and logging) anything outside 0–6.
    pub fn from_indices(indices: &[u8]) -> Self {
        indices.iter().fold(Self::empty(), |days, &index| {
            match Self::from_index(index) {
                Some(day) => days | day,
                None => {
                    warn!(index, "Ignoring weekday index outside 0-6");
                    days
                }
            }
        })
    }

    /// Schedule is known (at least one day set).
    pub fn is_known(self) -> bool {
        !self.is_empty()
    }

    pub fn contains_weekday(self, weekday: Weekday) -> bool {
        self.contains(Self::from_weekday(weekday))
    }

    /// Weekday indices in ascending order.
    pub fn indices(self) -> Vec<u8> {
        (0..7).filter(|&i| self.bits() & (1 << i) != 0).collect()
    }
}

/// Weekday for an index where 0 is Monday, as supplied by callers' date logic.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Where a catalog entry came from. Manual entries outrank scraped ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryOrigin {
    Manual,
    Supplementary,
}

/// A known drama.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Normalized title, unique within a catalog.
    pub key: String,
    /// Title as it was supplied, used for display when the row's own text is noisy.
    pub title: String,
    pub air_days: AirDays,
    pub origin: EntryOrigin,
}

impl CatalogEntry {
    /// The supplied title when it is a presentation form. A catalog built
    /// from bare normalized keys has none.
    pub fn presentation_title(&self) -> Option<&str> {
        (self.title != self.key).then_some(self.title.as_str())
    }
}

/// A title in a manual or supplementary list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSpec {
    pub name: String,
    /// Weekday indices, 0 = Monday. Empty when the schedule is unknown.
    #[serde(default)]
    pub days: Vec<u8>,
}

impl TitleSpec {
    pub fn new(name: impl Into<String>, days: &[u8]) -> Self {
        Self {
            name: name.into(),
            days: days.to_vec(),
        }
    }
}

/// Read-only lookup of known dramas, keyed by normalized title.
///
/// Iteration is in key order, which keeps every matcher tie-break deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a plain mapping of title → weekday indices.
    ///
    /// Titles are normalized into keys; entries whose key normalizes to
    /// nothing are skipped. Duplicate keys merge their days.
    pub fn from_schedule_map<I, K>(map: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<u8>)>,
        K: AsRef<str>,
    {
        CatalogBuilder::new(&[] as &[String])
            .manual(
                map.into_iter()
                    .map(|(title, days)| TitleSpec::new(title.as_ref(), &days)),
            )
            .build()
    }

    pub fn get(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assembles a [`Catalog`] from a manual list and a scraped supplementary list.
///
/// Collisions on a key resolve the same way regardless of call order:
/// - manual beats supplementary, but adopts the supplementary schedule when
///   it has none of its own;
/// - two entries of the same origin merge their days.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    exclude_keys: Vec<String>,
    entries: BTreeMap<String, CatalogEntry>,
}

impl CatalogBuilder {
    /// Supplementary titles containing any of `exclude_keywords` (compared
    /// normalized) are treated as non-drama programming and dropped.
    pub fn new<S: AsRef<str>>(exclude_keywords: &[S]) -> Self {
        let exclude_keys = exclude_keywords
            .iter()
            .map(|k| normalize(k.as_ref()))
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            exclude_keys,
            entries: BTreeMap::new(),
        }
    }

    pub fn manual(mut self, titles: impl IntoIterator<Item = TitleSpec>) -> Self {
        for listed in titles {
            self.insert(listed, EntryOrigin::Manual);
        }
        self
    }

    pub fn supplementary(mut self, titles: impl IntoIterator<Item = TitleSpec>) -> Self {
        for listed in titles {
            let key = normalize(&listed.name);
            if let Some(keyword) = self.exclude_keys.iter().find(|k| key.contains(k.as_str())) {
                debug!(title = %listed.name, %keyword, "Dropping excluded supplementary title");
                continue;
            }
            self.insert(listed, EntryOrigin::Supplementary);
        }
        self
    }

    pub fn build(self) -> Catalog {
        debug!(entries = self.entries.len(), "Catalog built");
        Catalog {
            entries: self.entries,
        }
    }

    fn insert(&mut self, listed: TitleSpec, origin: EntryOrigin) {
        let key = normalize(&listed.name);
        if key.is_empty() {
            warn!(title = %listed.name, "Skipping catalog title with empty key");
            return;
        }

        let incoming = CatalogEntry {
            title: listed.name.trim().to_string(),
            air_days: AirDays::from_indices(&listed.days),
            key: key.clone(),
            origin,
        };

        match self.entries.get_mut(&key) {
            None => {
                self.entries.insert(key, incoming);
            }
            Some(existing) if existing.origin == incoming.origin => {
                existing.air_days |= incoming.air_days;
            }
            Some(existing) if existing.origin == EntryOrigin::Manual => {
                if !existing.air_days.is_known() {
                    existing.air_days = incoming.air_days;
                }
            }
            Some(existing) => {
                let fallback_days = existing.air_days;
                *existing = incoming;
                if !existing.air_days.is_known() {
                    existing.air_days = fallback_days;
                }
            }
        }
    }
}

/// On-disk manual catalog (TOML).
///
/// ```toml
/// [[title]]
/// name = "결혼하자 맹꽁아"
/// days = [0, 1, 2, 3, 4]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, rename = "title")]
    pub titles: Vec<TitleSpec>,
}

impl CatalogFile {
    pub fn load(path: &Path) -> Result<Self, SicheongError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, SicheongError> {
        toml::from_str(content).map_err(|e| SicheongError::Catalog(e.to_string()))
    }
}

/// Load a scraped supplementary list (JSON array of `{name, days}`).
pub fn load_supplementary(path: &Path) -> Result<Vec<TitleSpec>, SicheongError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
