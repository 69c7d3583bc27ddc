pub mod commands;
pub mod config;
pub mod error;
pub mod store;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use review_engine::ReviewService;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::Result;
use crate::store::JsonStore;

#[derive(Debug, Parser)]
#[command(name = "review-tool", version, about = "Spaced repetition review scheduler")]
pub struct Cli {
    /// Directory holding items.json and history.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new review item
    Add(commands::item::AddArgs),
    /// Record a review with quality 0-5
    Review {
        item_id: String,
        #[arg(allow_negative_numbers = true)]
        quality: i64,
        /// Review date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show an item and its performance summary
    Show { item_id: String },
    /// Bucket all items by when they are due
    Schedule {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List items due on or before the date
    Due {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Build the daily review plan
    Plan {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        max_items: Option<usize>,
    },
    /// Review totals, mastery distribution and streaks
    Stats {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Filter directive from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
pub fn log_filter<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup("RUST_LOG")
        .filter(|filter| !filter.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

/// Install the tracing subscriber. Logs go to stderr; stdout carries JSON output.
///
/// Call after [`config::load_dotenv`].
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter(|key| {
            std::env::var(key).ok()
        })))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Execute a parsed command and return its JSON output.
pub fn run(cli: Cli, config: Config) -> Result<Value> {
    let data_dir = cli.data_dir.unwrap_or(config.data_dir);
    let store = JsonStore::open(&data_dir)?;
    tracing::debug!(data_dir = %store.dir().display(), "using data directory");

    let mut service = ReviewService::with_settings(store, config.settings);
    let today = |date: Option<NaiveDate>| date.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Commands::Add(args) => commands::item::add(&mut service, args),
        Commands::Review {
            item_id,
            quality,
            date,
        } => commands::review::run(&mut service, &item_id, quality, today(date)),
        Commands::Show { item_id } => commands::item::show(&service, &item_id),
        Commands::Schedule { date } => commands::schedule::run(&service, today(date)),
        Commands::Due { date } => commands::schedule::due(&service, today(date)),
        Commands::Plan { date, max_items } => commands::plan::run(&service, today(date), max_items),
        Commands::Stats { date } => commands::stats::run(&service, today(date)),
    }
}
