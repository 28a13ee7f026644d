use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sicheong")]
#[command(about = "Rank airing Korean dramas by tier from TV ratings tables", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to the user config, then built-in defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify ranking tables and print the per-tier digest as JSON
    Rank {
        /// Ranking tables JSON: [{"source": "terrestrial"|"cable", "rows": [...]}]
        #[arg(required = true)]
        tables: PathBuf,

        /// Manual drama catalog (TOML, [[title]] name/days)
        #[arg(short = 'm', long)]
        catalog: PathBuf,

        /// Scraped supplementary titles (JSON array of {name, days})
        #[arg(short, long)]
        supplementary: Option<PathBuf>,

        /// Reference weekday, 0 = Monday .. 6 = Sunday
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=6), conflicts_with = "date")]
        weekday: Option<u8>,

        /// Reference date (YYYY-MM-DD); today in Korea time when omitted
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Rows kept per tier (overrides config)
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        limit: Option<u64>,

        /// Write the digest here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the config file path (`--config` when given, else the user file)
    Config {
        /// Write the current settings to that path
        #[arg(long)]
        init: bool,
    },
}
