use regex::Regex;
use std::sync::LazyLock;

use crate::elements::{Enclosure, Segment};

// Innermost `(..)`, `[..]` or `<..>` run. Brackets of another kind may nest
// inside a paren segment; same-kind nesting matches the inner pair only.
pub(crate) static RE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)|\[([^\[\]]*)\]|<([^<>]*)>").unwrap());

/// Split out every delimited segment of a raw title, in order of appearance.
pub fn segments(raw: &str) -> Vec<Segment> {
    RE_SEGMENT
        .captures_iter(raw)
        .filter_map(|caps| {
            let (enclosure, content) = if let Some(m) = caps.get(1) {
                (Enclosure::Paren, m)
            } else if let Some(m) = caps.get(2) {
                (Enclosure::Square, m)
            } else {
                (Enclosure::Angle, caps.get(3)?)
            };
            Some(Segment {
                enclosure,
                content: content.as_str().to_string(),
            })
        })
        .collect()
}
