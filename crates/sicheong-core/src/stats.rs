use serde::Serialize;

use crate::matcher::MatchStrategy;

/// Match counters for one digest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub rows_seen: u64,
    pub rows_malformed: u64,
    pub hits_exact: u64,
    pub hits_containment: u64,
    pub hits_similarity: u64,
    pub hits_keyword: u64,
    pub misses: u64,
    pub reruns: u64,
}

impl MatchStats {
    pub fn record_hit(&mut self, strategy: MatchStrategy) {
        match strategy {
            MatchStrategy::Exact => self.hits_exact += 1,
            MatchStrategy::Containment => self.hits_containment += 1,
            MatchStrategy::Similarity => self.hits_similarity += 1,
            MatchStrategy::Keyword => self.hits_keyword += 1,
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits_exact + self.hits_containment + self.hits_similarity + self.hits_keyword
    }

    pub fn merge(&mut self, other: &MatchStats) {
        self.rows_seen += other.rows_seen;
        self.rows_malformed += other.rows_malformed;
        self.hits_exact += other.hits_exact;
        self.hits_containment += other.hits_containment;
        self.hits_similarity += other.hits_similarity;
        self.hits_keyword += other.hits_keyword;
        self.misses += other.misses;
        self.reruns += other.reruns;
    }
}
