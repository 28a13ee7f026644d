use thiserror::Error;

#[derive(Debug, Error)]
pub enum SicheongError {
    #[error("config error: {0}")]
    Config(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a scraped table row could not become a [`BroadcastRow`](crate::models::BroadcastRow).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
}
