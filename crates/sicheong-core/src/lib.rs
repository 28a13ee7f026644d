pub mod catalog;
pub mod channel;
pub mod config;
pub mod error;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod ranker;
pub mod rerun;
pub mod similarity;
pub mod stats;

pub use catalog::{Catalog, CatalogBuilder, CatalogEntry};
pub use config::AppConfig;
pub use error::SicheongError;
pub use matcher::{match_row, MatchResult, MatchStrategy, Matcher};
pub use pipeline::{Digest, Engine, TierRanking};
pub use rerun::detect_rerun;
