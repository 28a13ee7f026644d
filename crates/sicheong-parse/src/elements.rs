use serde::{Deserialize, Serialize};

/// Which pair of delimiters enclosed a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Enclosure {
    Paren,
    Square,
    Angle,
}

/// A delimited segment of a ranking-row title, e.g. `(결혼하자 맹꽁아)` or `<재>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub enclosure: Enclosure,
    /// Content between the delimiters, untrimmed.
    pub content: String,
}

/// Elements parsed out of a raw ranking-row title.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleElements {
    /// Human-facing title with slot labels and tags removed.
    pub display_title: String,
    /// An explicit rerun tag (`(재)`, `[R]`, `<재>` ...) was present.
    pub rerun_tagged: bool,
    /// Generic drama-format marker found in the title (e.g. "드라마").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drama_format: Option<String>,
    /// Every delimited segment, in order of appearance.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<Segment>,
}
