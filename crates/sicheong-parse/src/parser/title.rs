use regex::Regex;
use std::sync::LazyLock;

use super::segment::RE_SEGMENT;
use crate::keyword::{self, MarkerKind};

static RE_ANGLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^<>]*>").unwrap());
static RE_SQUARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\[\]]*\]").unwrap());

/// Pull the human-facing title out of a ranking-row title.
///
/// Ranking sources print a slot label followed by the real title in
/// parentheses ("일일드라마(결혼하자 맹꽁아)"), so the first parenthesized
/// segment with more than one character of content wins. Angle and square
/// bracket tags are then dropped and the result trimmed.
pub fn extract_display_title(raw: &str) -> String {
    let candidate = first_paren_title(raw).unwrap_or(raw);
    let without_angle = RE_ANGLE.replace_all(candidate, "");
    let without_square = RE_SQUARE.replace_all(&without_angle, "");
    without_square.trim().to_string()
}

/// Content of the first `(..)` segment whose trimmed content is longer than one char.
fn first_paren_title(raw: &str) -> Option<&str> {
    outer_parens(raw)
        .into_iter()
        .map(str::trim)
        .find(|content| content.chars().count() > 1)
}

/// Contents of the outermost balanced `(..)` pairs, in order. Parentheses
/// nested inside a title stay part of it; unclosed pairs yield nothing.
fn outer_parens(raw: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        match c {
            '(' => {
                if depth == 0 {
                    start = i + c.len_utf8();
                }
                depth += 1;
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    found.push(&raw[start..i]);
                }
            }
            _ => {}
        }
    }
    found
}

/// Remove every enclosed rerun tag (`(재)`, `[R]`, `<재>` ...) from a title.
pub fn strip_rerun_tags(title: &str) -> String {
    let stripped = RE_SEGMENT.replace_all(title, |caps: &regex::Captures<'_>| {
        let content = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        match keyword::lookup_contextual(content, true) {
            Some(entry) if entry.kind == MarkerKind::Rerun => String::new(),
            _ => caps[0].to_string(),
        }
    });
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
