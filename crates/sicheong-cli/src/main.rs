mod cli;

use std::path::{Path, PathBuf};

use chrono::{Datelike, FixedOffset, NaiveDate, Utc, Weekday};
use clap::Parser;
use sicheong_core::catalog::{self, CatalogBuilder, CatalogFile};
use sicheong_core::models::RankingTable;
use sicheong_core::{AppConfig, Engine, SicheongError};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

/// Korea Standard Time, UTC+9.
const KST_OFFSET_SECS: i32 = 9 * 3600;

fn main() -> Result<(), SicheongError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sicheong=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let creating = matches!(cli.command, Commands::Config { init: true });
    let mut config = load_config(cli.config.as_deref(), creating)?;

    match cli.command {
        Commands::Rank {
            tables,
            catalog: catalog_path,
            supplementary,
            weekday,
            date,
            limit,
            output,
        } => {
            if let Some(limit) = limit {
                config.report.limit = usize::try_from(limit).unwrap_or(usize::MAX);
            }
            let weekday = resolve_weekday(weekday, date, kst_today());

            let manual = CatalogFile::load(&catalog_path)?;
            let mut builder =
                CatalogBuilder::new(&config.filter.exclude_keywords).manual(manual.titles);
            if let Some(path) = &supplementary {
                builder = builder.supplementary(catalog::load_supplementary(path)?);
            }
            let catalog = builder.build();
            info!(entries = catalog.len(), %weekday, "Catalog loaded");

            let tables = load_tables(&tables)?;
            let digest = Engine::new(&catalog, &config).digest(&tables, weekday);
            let json = serde_json::to_string_pretty(&digest)?;
            match output {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        Commands::Config { init } => {
            let path = config_target(cli.config.as_deref());
            if init {
                config.save_to(&path)?;
                info!(path = %path.display(), "Config written");
            }
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// `--config` when given, else the user file over built-in defaults. A
/// missing explicit file is only tolerated when it is about to be created.
fn load_config(explicit: Option<&Path>, creating: bool) -> Result<AppConfig, SicheongError> {
    match explicit {
        Some(path) if creating && !path.exists() => Ok(AppConfig::default()),
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

/// Config file the `config` command reports and writes.
fn config_target(explicit: Option<&Path>) -> PathBuf {
    explicit.map_or_else(AppConfig::config_path, Path::to_path_buf)
}

fn load_tables(path: &Path) -> Result<Vec<RankingTable>, SicheongError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Explicit weekday, else the date's weekday, else today's.
fn resolve_weekday(index: Option<u8>, date: Option<NaiveDate>, today: NaiveDate) -> Weekday {
    index
        .and_then(catalog::weekday_from_index)
        .unwrap_or_else(|| date.unwrap_or(today).weekday())
}

fn kst_today() -> NaiveDate {
    let now = Utc::now();
    FixedOffset::east_opt(KST_OFFSET_SECS)
        .map_or_else(|| now.date_naive(), |kst| now.with_timezone(&kst).date_naive())
}
