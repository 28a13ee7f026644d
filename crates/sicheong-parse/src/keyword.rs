use bitflags::bitflags;
use phf::phf_map;

bitflags! {
    /// Flags controlling when and how a marker matches.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MarkerFlags: u8 {
        /// Only match this marker when it is the whole content of a
        /// `(..)`, `[..]` or `<..>` segment. Single-syllable tags like "재"
        /// appear inside ordinary titles far too often to match in free text.
        const ENCLOSED_ONLY = 0b0000_0001;
    }
}

/// What a marker tells us about the row it appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Generic drama-format word (serial, daily drama, miniseries).
    DramaFormat,
    /// Explicit repeat-broadcast tag.
    Rerun,
}

/// A marker entry with its kind and matching flags.
#[derive(Debug, Clone, Copy)]
pub struct MarkerEntry {
    pub kind: MarkerKind,
    pub flags: MarkerFlags,
}

impl MarkerEntry {
    const fn new(kind: MarkerKind) -> Self {
        Self {
            kind,
            flags: MarkerFlags::empty(),
        }
    }

    const fn enclosed(kind: MarkerKind) -> Self {
        Self {
            kind,
            flags: MarkerFlags::ENCLOSED_ONLY,
        }
    }
}

/// Compile-time marker lookup table.
/// ASCII keys are UPPERCASE for case-insensitive matching.
pub static MARKERS: phf::Map<&'static str, MarkerEntry> = phf_map! {
    // ── Drama formats ────────────────────────────────────────────
    "드라마" => MarkerEntry::new(MarkerKind::DramaFormat),
    "연속극" => MarkerEntry::new(MarkerKind::DramaFormat),
    "미니시리즈" => MarkerEntry::new(MarkerKind::DramaFormat),
    "일일극" => MarkerEntry::new(MarkerKind::DramaFormat),
    "주말극" => MarkerEntry::new(MarkerKind::DramaFormat),
    "대하사극" => MarkerEntry::new(MarkerKind::DramaFormat),

    // ── Rerun tags ───────────────────────────────────────────────
    "재" => MarkerEntry::enclosed(MarkerKind::Rerun),
    "R" => MarkerEntry::enclosed(MarkerKind::Rerun),
};

/// Look up a marker with contextual matching.
///
/// If `is_enclosed` is false, markers with the `ENCLOSED_ONLY` flag are skipped.
pub fn lookup_contextual(s: &str, is_enclosed: bool) -> Option<&'static MarkerEntry> {
    let entry = MARKERS.get(s.trim().to_uppercase().as_str())?;
    if !is_enclosed && entry.flags.contains(MarkerFlags::ENCLOSED_ONLY) {
        return None;
    }
    Some(entry)
}

/// Find the longest drama-format marker contained anywhere in `text`.
///
/// `text` should already have whitespace removed so split spellings such as
/// "미니 시리즈" still match.
pub fn find_drama_format(text: &str) -> Option<&'static str> {
    let upper = text.to_uppercase();
    MARKERS
        .entries()
        .filter(|(key, entry)| {
            entry.kind == MarkerKind::DramaFormat
                && !entry.flags.contains(MarkerFlags::ENCLOSED_ONLY)
                && upper.contains(**key)
        })
        .map(|(key, _)| *key)
        .max_by(|a, b| a.chars().count().cmp(&b.chars().count()).then(b.cmp(a)))
}
