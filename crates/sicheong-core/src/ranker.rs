use crate::models::MatchedRow;

/// Sort by rating, highest first. The sort is stable, so equal ratings keep
/// their input order.
pub fn rank(mut rows: Vec<MatchedRow>) -> Vec<MatchedRow> {
    rows.sort_by(|a, b| b.rating_value().total_cmp(&a.rating_value()));
    rows
}

/// [`rank`], keeping at most `limit` rows.
pub fn top(rows: Vec<MatchedRow>, limit: usize) -> Vec<MatchedRow> {
    let mut ranked = rank(rows);
    ranked.truncate(limit);
    ranked
}
