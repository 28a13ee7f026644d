//! Title normalization for catalog key comparison.
//!
//! Keys are never shown to a user. Ranking sources and catalog lists spell
//! the same drama with different spacing, punctuation and width, so every
//! comparison in the matcher goes through [`normalize`] on both sides.

use unicode_normalization::UnicodeNormalization;

/// Normalize a title into a comparison key.
///
/// Levels applied in order:
/// 1. Unicode NFKC + case folding
/// 2. Erasure of everything except Hangul syllables and ASCII letters/digits
pub fn normalize(s: &str) -> String {
    let s = unicode_normalize(s);
    erase_non_key_chars(&s)
}

// ── Level 1: Unicode NFKC + case folding ──────────────────────────────

/// Apply NFKC (fullwidth → ASCII, conjoining jamo → syllables) and lowercase.
fn unicode_normalize(s: &str) -> String {
    s.nfkc().collect::<String>().to_lowercase()
}

// ── Level 2: Character erasure ────────────────────────────────────────

/// Keep Hangul syllables and ASCII alphanumerics, drop everything else
/// (spaces, punctuation, bracket symbols, other scripts).
fn erase_non_key_chars(s: &str) -> String {
    s.chars().filter(|&c| is_key_char(c)).collect()
}

fn is_key_char(c: char) -> bool {
    matches!(c, '가'..='힣') || c.is_ascii_alphanumeric()
}
