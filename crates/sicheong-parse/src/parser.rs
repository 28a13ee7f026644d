pub mod segment;
pub mod title;

use crate::elements::TitleElements;
use crate::keyword::{self, MarkerKind};

/// Parse a raw ranking-row title into its component elements.
///
/// # Example
/// ```
/// let result = sicheong_parse::parse("<재> 일일드라마(결혼하자 맹꽁아)");
/// assert_eq!(result.display_title, "결혼하자 맹꽁아");
/// assert!(result.rerun_tagged);
/// assert_eq!(result.drama_format.as_deref(), Some("드라마"));
/// ```
pub fn parse(raw: &str) -> TitleElements {
    let segments = segment::segments(raw);

    let rerun_tagged = segments.iter().any(|seg| {
        matches!(
            keyword::lookup_contextual(&seg.content, true),
            Some(entry) if entry.kind == MarkerKind::Rerun
        )
    });

    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let drama_format = keyword::find_drama_format(&compact).map(str::to_string);

    let elements = TitleElements {
        display_title: title::extract_display_title(raw),
        rerun_tagged,
        drama_format,
        segments,
    };
    tracing::trace!(raw, display = %elements.display_title, "Parsed ranking title");
    elements
}
