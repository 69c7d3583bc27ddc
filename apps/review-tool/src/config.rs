//! Tool configuration from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use review_engine::EngineSettings;

use crate::error::{Result, ToolError};

pub const DEFAULT_DATA_DIR: &str = "./data";

/// Load `.env` into the process environment if present. Runs before logging
/// is set up so `RUST_LOG` may come from the file.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub settings: EngineSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            settings: EngineSettings::default(),
        }
    }
}

impl Config {
    /// Read `REVIEW_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let data_dir = lookup("REVIEW_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let max_items = parse_var(&lookup, "REVIEW_MAX_ITEMS")?
            .unwrap_or(defaults.settings.max_items);
        let minutes_per_item = parse_var(&lookup, "REVIEW_MINUTES_PER_ITEM")?
            .unwrap_or(defaults.settings.minutes_per_item);

        Ok(Self {
            data_dir,
            settings: EngineSettings {
                max_items,
                minutes_per_item,
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| {
                ToolError::Config(format!("{key} must be a non-negative integer, got {raw:?}"))
            }),
    }
}
