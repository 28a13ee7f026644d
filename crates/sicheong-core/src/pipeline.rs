use chrono::Weekday;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::channel;
use crate::config::{AppConfig, MatcherConfig, ReportConfig};
use crate::matcher::{MatchStrategy, Matcher};
use crate::models::{BroadcastRow, MatchedRow, RankingTable, Source, Tier};
use crate::ranker;
use crate::rerun;
use crate::stats::MatchStats;

/// Top rows of one tier.
#[derive(Debug, Clone, Serialize)]
pub struct TierRanking {
    pub tier: Tier,
    pub label: &'static str,
    /// Dramas found in this tier before truncation.
    pub total: usize,
    pub rows: Vec<MatchedRow>,
}

/// Ranked dramas per tier for one reference weekday.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub weekday: Weekday,
    /// One ranking per tier, in [`Tier::ALL`] order, empty when no drama aired.
    pub tiers: Vec<TierRanking>,
    pub stats: MatchStats,
}

impl Digest {
    pub fn tier(&self, tier: Tier) -> &[MatchedRow] {
        self.tiers
            .iter()
            .find(|t| t.tier == tier)
            .map(|t| t.rows.as_slice())
            .unwrap_or_default()
    }
}

/// Runs ranking tables through matching, rerun detection, tiering and ranking.
///
/// Borrows the catalog read-only, so one catalog can serve several engines
/// at once.
#[derive(Debug, Clone)]
pub struct Engine<'a> {
    matcher: Matcher<'a>,
    limit: usize,
}

impl<'a> Engine<'a> {
    pub fn new(catalog: &'a Catalog, config: &AppConfig) -> Self {
        Self {
            matcher: Matcher::new(catalog, &config.matcher)
                .with_exclusions(&config.filter.exclude_keywords),
            limit: config.report.limit,
        }
    }

    /// Default thresholds and limit, no exclude keywords.
    pub fn with_defaults(catalog: &'a Catalog) -> Self {
        Self {
            matcher: Matcher::new(catalog, &MatcherConfig::default()),
            limit: ReportConfig::default().limit,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.matcher.catalog()
    }

    /// Classify one row; `None` when it is not a drama.
    pub fn classify_row(
        &self,
        row: &BroadcastRow,
        source: Source,
        weekday: Weekday,
    ) -> Option<MatchedRow> {
        self.classify(row, source, weekday, &mut MatchStats::default())
    }

    fn classify(
        &self,
        row: &BroadcastRow,
        source: Source,
        weekday: Weekday,
        stats: &mut MatchStats,
    ) -> Option<MatchedRow> {
        let elements = sicheong_parse::parse(&row.raw_title);
        let result = self.matcher.match_parsed(&row.raw_title, &elements);
        let Some(strategy) = result.strategy() else {
            stats.misses += 1;
            return None;
        };
        stats.record_hit(strategy);

        let entry = result.entry();
        // Fuzzy hits show the catalog's spelling, when it has one.
        let catalog_title = match strategy {
            MatchStrategy::Containment | MatchStrategy::Similarity => {
                entry.and_then(|e| e.presentation_title())
            }
            MatchStrategy::Exact | MatchStrategy::Keyword => None,
        };
        let mut display_title = catalog_title
            .unwrap_or(&elements.display_title)
            .to_string();

        let rerun_reason = rerun::rerun_reason(&elements, entry, weekday);
        if let Some(reason) = rerun_reason {
            debug!(raw_title = %row.raw_title, ?reason, "Rerun");
            display_title = rerun::mark_rerun(&display_title);
            stats.reruns += 1;
        }

        Some(MatchedRow {
            row: row.clone(),
            display_title,
            is_rerun: rerun_reason.is_some(),
            tier: channel::tier_for(source, &row.channel),
            match_confidence: result.confidence(),
            strategy,
            catalog_key: entry.map(|e| e.key.clone()),
        })
    }

    /// Classify every row of a table. Malformed rows are skipped and counted.
    #[tracing::instrument(
        name = "classify_table",
        skip(self, table, stats),
        fields(source = ?table.source, rows = table.rows.len())
    )]
    pub fn classify_table(
        &self,
        table: &RankingTable,
        weekday: Weekday,
        stats: &mut MatchStats,
    ) -> Vec<MatchedRow> {
        let mut matched = Vec::new();
        for (index, raw) in table.rows.iter().enumerate() {
            stats.rows_seen += 1;
            let row = match BroadcastRow::try_from(raw) {
                Ok(row) => row,
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed row");
                    stats.rows_malformed += 1;
                    continue;
                }
            };
            matched.extend(self.classify(&row, table.source, weekday, stats));
        }
        matched
    }

    /// Classify all tables and rank the dramas of each tier.
    pub fn digest(&self, tables: &[RankingTable], weekday: Weekday) -> Digest {
        let mut stats = MatchStats::default();
        let mut matched = Vec::new();
        for table in tables {
            let mut table_stats = MatchStats::default();
            matched.extend(self.classify_table(table, weekday, &mut table_stats));
            debug!(
                source = ?table.source,
                dramas = table_stats.hits(),
                misses = table_stats.misses,
                "Table classified"
            );
            stats.merge(&table_stats);
        }

        let tiers: Vec<TierRanking> = Tier::ALL
            .iter()
            .map(|&tier| {
                let in_tier: Vec<MatchedRow> =
                    matched.iter().filter(|m| m.tier == tier).cloned().collect();
                let total = in_tier.len();
                TierRanking {
                    tier,
                    label: tier.label(),
                    total,
                    rows: ranker::top(in_tier, self.limit),
                }
            })
            .collect();

        info!(
            %weekday,
            rows = stats.rows_seen,
            dramas = stats.hits(),
            reruns = stats.reruns,
            malformed = stats.rows_malformed,
            "Digest ready"
        );

        Digest {
            weekday,
            tiers,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogBuilder, TitleSpec};
    use crate::models::RawRow;

    fn raw(channel: &str, title: &str, rating: &str) -> RawRow {
        RawRow {
            channel: Some(channel.into()),
            title: Some(title.into()),
            rating: Some(rating.into()),
        }
    }

    fn weekday_scenario() -> (Catalog, Vec<RankingTable>) {
        let catalog = Catalog::from_schedule_map([("결혼하자맹꽁아", vec![0, 1, 2, 3, 4])]);
        let tables = vec![RankingTable {
            source: Source::Terrestrial,
            rows: vec![
                raw("MBC", "일일드라마(결혼하자 맹꽁아)", "9.2%"),
                raw("KBS1", "9시 뉴스", "15.0%"),
            ],
        }];
        (catalog, tables)
    }

    #[test]
    fn on_schedule_weekday() {
        let (catalog, tables) = weekday_scenario();
        let digest = Engine::with_defaults(&catalog).digest(&tables, Weekday::Wed);

        let rows = digest.tier(Tier::Terrestrial);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].display_title, "결혼하자 맹꽁아");
        assert!(!rows[0].is_rerun);
        assert_eq!(rows[0].tier, Tier::Terrestrial);
        assert_eq!(rows[0].rating_value(), 9.2);
        assert!(digest.tier(Tier::SemiCable).is_empty());
        assert!(digest.tier(Tier::Cable).is_empty());
        assert_eq!(digest.stats.misses, 1);
    }

    #[test]
    fn off_schedule_weekday_is_rerun() {
        let (catalog, tables) = weekday_scenario();
        let digest = Engine::with_defaults(&catalog).digest(&tables, Weekday::Sun);

        let rows = digest.tier(Tier::Terrestrial);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_rerun);
        assert_eq!(rows[0].display_title, "(재) 결혼하자 맹꽁아");
        assert_eq!(digest.stats.reruns, 1);
    }

    #[test]
    fn cable_table_splits_by_channel() {
        let catalog = Catalog::from_schedule_map([
            ("눈물의 여왕", vec![5, 6]),
            ("닥터 차정숙", vec![5, 6]),
        ]);
        let tables = vec![RankingTable {
            source: Source::Cable,
            rows: vec![
                raw("tvN", "토일드라마(눈물의 여왕)", "21.1%"),
                raw("JTBC", "토일드라마(닥터 차정숙)", "18.5%"),
            ],
        }];
        let digest = Engine::with_defaults(&catalog).digest(&tables, Weekday::Sat);
        assert_eq!(digest.tier(Tier::Cable)[0].display_title, "눈물의 여왕");
        assert_eq!(digest.tier(Tier::SemiCable)[0].display_title, "닥터 차정숙");
        assert!(digest.tier(Tier::Terrestrial).is_empty());
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let catalog = Catalog::from_schedule_map([("결혼하자맹꽁아", vec![])]);
        let table = RankingTable {
            source: Source::Terrestrial,
            rows: vec![
                RawRow {
                    channel: None,
                    title: Some("결혼하자 맹꽁아".into()),
                    rating: Some("9.2%".into()),
                },
                raw("MBC", "결혼하자 맹꽁아", "9.2%"),
            ],
        };
        let mut stats = MatchStats::default();
        let rows = Engine::with_defaults(&catalog).classify_table(&table, Weekday::Mon, &mut stats);
        assert_eq!(rows.len(), 1);
        assert_eq!(stats.rows_seen, 2);
        assert_eq!(stats.rows_malformed, 1);
    }

    #[test]
    fn containment_match_displays_catalog_title() {
        let catalog = Catalog::from_schedule_map([("미녀와 순정남", vec![5, 6])]);
        let row = BroadcastRow::new("KBS2", "KBS 주말극 미녀와순정남 38회", "20.3%");
        let matched = Engine::with_defaults(&catalog)
            .classify_row(&row, Source::Terrestrial, Weekday::Sat)
            .unwrap();
        assert_eq!(matched.display_title, "미녀와 순정남");
        assert_eq!(matched.strategy, MatchStrategy::Containment);
        assert_eq!(matched.catalog_key.as_deref(), Some("미녀와순정남"));
    }

    #[test]
    fn normalized_key_catalog_never_leaks_keys_into_display() {
        let catalog = Catalog::from_schedule_map([
            ("미녀와순정남", vec![5, 6]),
            ("수지맞은우리", vec![]),
        ]);
        let engine = Engine::with_defaults(&catalog);

        let row = BroadcastRow::new("KBS2", "KBS 주말극 미녀와 순정남 38회", "20.3%");
        let matched = engine
            .classify_row(&row, Source::Terrestrial, Weekday::Sat)
            .unwrap();
        assert_eq!(matched.strategy, MatchStrategy::Containment);
        assert_eq!(matched.display_title, "KBS 주말극 미녀와 순정남 38회");

        let row = BroadcastRow::new("KBS1", "수지 맞는 우리", "17.0%");
        let matched = engine
            .classify_row(&row, Source::Terrestrial, Weekday::Mon)
            .unwrap();
        assert_eq!(matched.strategy, MatchStrategy::Similarity);
        assert_eq!(matched.display_title, "수지 맞는 우리");
        assert_eq!(matched.catalog_key.as_deref(), Some("수지맞은우리"));
    }

    #[test]
    fn nested_parenthesized_title_survives_keyword_fallback() {
        let catalog = Catalog::empty();
        let row = BroadcastRow::new("JTBC", "토일드라마(나의 해방일지 (2부))", "6.7%");
        let matched = Engine::with_defaults(&catalog)
            .classify_row(&row, Source::Cable, Weekday::Sat)
            .unwrap();
        assert_eq!(matched.strategy, MatchStrategy::Keyword);
        assert_eq!(matched.display_title, "나의 해방일지 (2부)");
    }

    #[test]
    fn tagged_keyword_match_gets_single_marker() {
        let catalog = Catalog::empty();
        let row = BroadcastRow::new("SBS", "금토드라마 (재)", "4.0%");
        let matched = Engine::with_defaults(&catalog)
            .classify_row(&row, Source::Terrestrial, Weekday::Mon)
            .unwrap();
        assert!(matched.is_rerun);
        assert_eq!(matched.display_title, "(재) 금토드라마");
        assert_eq!(matched.strategy, MatchStrategy::Keyword);
        assert_eq!(matched.catalog_key, None);
    }

    #[test]
    fn config_exclusions_and_limit_apply() {
        let catalog = Catalog::empty();
        let mut config = AppConfig::default();
        config.report.limit = 2;
        config.filter.exclude_keywords = vec!["예고".into()];

        let table = RankingTable {
            source: Source::Cable,
            rows: vec![
                raw("tvN", "월화드라마", "3.0%"),
                raw("tvN", "수목드라마", "4.0%"),
                raw("tvN", "토일드라마", "5.0%"),
                raw("tvN", "토일드라마 예고", "6.0%"),
            ],
        };
        let digest = Engine::new(&catalog, &config).digest(&[table], Weekday::Mon);
        let cable = &digest.tiers[2];
        assert_eq!(cable.tier, Tier::Cable);
        assert_eq!(cable.total, 3);
        let titles: Vec<&str> = cable.rows.iter().map(|r| r.display_title.as_str()).collect();
        assert_eq!(titles, vec!["토일드라마", "수목드라마"]);
    }

    #[test]
    fn digest_stats_sum_over_tables() {
        let catalog = Catalog::from_schedule_map([("결혼하자맹꽁아", vec![0, 1, 2, 3, 4])]);
        let tables = vec![
            RankingTable {
                source: Source::Terrestrial,
                rows: vec![
                    raw("MBC", "일일드라마(결혼하자 맹꽁아)", "9.2%"),
                    raw("KBS1", "9시 뉴스", "15.0%"),
                ],
            },
            RankingTable {
                source: Source::Cable,
                rows: vec![
                    raw("tvN", "월화드라마", "3.0%"),
                    RawRow::default(),
                ],
            },
        ];
        let digest = Engine::with_defaults(&catalog).digest(&tables, Weekday::Sun);
        let stats = &digest.stats;
        assert_eq!(stats.rows_seen, 4);
        assert_eq!(stats.rows_malformed, 1);
        assert_eq!(stats.hits_exact, 1);
        assert_eq!(stats.hits_keyword, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.reruns, 1);
    }

    #[test]
    fn empty_catalog_still_runs() {
        let catalog = Catalog::empty();
        let digest = Engine::with_defaults(&catalog).digest(&[], Weekday::Mon);
        assert_eq!(digest.tiers.len(), 3);
        assert_eq!(digest.stats, MatchStats::default());
    }

    #[test]
    fn digest_serializes() {
        let (catalog, tables) = weekday_scenario();
        let digest = Engine::with_defaults(&catalog).digest(&tables, Weekday::Wed);
        let json = serde_json::to_value(&digest).unwrap();
        assert_eq!(json["tiers"][0]["label"], "지상파");
        assert_eq!(json["tiers"][0]["rows"][0]["display_title"], "결혼하자 맹꽁아");
        assert_eq!(json["stats"]["hits_exact"], 1);
    }

    #[test]
    fn manual_and_scraped_catalog_feed_the_engine() {
        let catalog = CatalogBuilder::new(&["뉴스"])
            .manual([TitleSpec::new("결혼하자 맹꽁아", &[])])
            .supplementary([
                TitleSpec::new("결혼하자 맹꽁아", &[0, 1, 2, 3, 4]),
                TitleSpec::new("뉴스데스크", &[0]),
            ])
            .build();
        let row = BroadcastRow::new("MBC", "일일드라마(결혼하자 맹꽁아)", "9.2%");
        let engine = Engine::with_defaults(&catalog);
        let matched = engine
            .classify_row(&row, Source::Terrestrial, Weekday::Sat)
            .unwrap();
        assert!(matched.is_rerun);
        assert_eq!(engine.catalog().len(), 1);
        let news = BroadcastRow::new("MBC", "뉴스데스크", "5.0%");
        assert!(engine
            .classify_row(&news, Source::Terrestrial, Weekday::Mon)
            .is_none());
    }
}
