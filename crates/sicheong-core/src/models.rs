mod broadcast;
mod matched;

pub use broadcast::{parse_rating, BroadcastRow, RankingTable, RawRow, Source};
pub use matched::{MatchedRow, Tier};
