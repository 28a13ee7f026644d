//! Rerun detection from explicit title tags and schedule mismatches.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use sicheong_parse::{strip_rerun_tags, TitleElements};

use crate::catalog::CatalogEntry;
use crate::models::BroadcastRow;

/// Marker placed in front of a rerun's display title.
pub const RERUN_MARKER: &str = "(재)";

/// Why a row was judged a rerun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RerunReason {
    /// The title carried a rerun tag such as `(재)` or `[R]`.
    Tagged,
    /// The entry's known schedule does not include the reference weekday.
    OffSchedule,
}

/// Decide whether a parsed row is a rerun.
///
/// An explicit tag wins over the schedule check. An entry with no known
/// air days never produces [`RerunReason::OffSchedule`].
pub fn rerun_reason(
    elements: &TitleElements,
    entry: Option<&CatalogEntry>,
    weekday: Weekday,
) -> Option<RerunReason> {
    if elements.rerun_tagged {
        return Some(RerunReason::Tagged);
    }
    let entry = entry?;
    (entry.air_days.is_known() && !entry.air_days.contains_weekday(weekday))
        .then_some(RerunReason::OffSchedule)
}

pub fn detect_rerun(row: &BroadcastRow, entry: Option<&CatalogEntry>, weekday: Weekday) -> bool {
    let elements = sicheong_parse::parse(&row.raw_title);
    rerun_reason(&elements, entry, weekday).is_some()
}

/// Prefix a display title with [`RERUN_MARKER`], dropping any rerun tag
/// it already carries.
pub fn mark_rerun(title: &str) -> String {
    let bare = strip_rerun_tags(title);
    if bare.is_empty() {
        RERUN_MARKER.to_string()
    } else {
        format!("{RERUN_MARKER} {bare}")
    }
}
