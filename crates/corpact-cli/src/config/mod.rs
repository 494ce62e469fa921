//! Configuration loading and resolution.
//!
//! Every setting resolves in the same order: explicit flag, then
//! environment variable, then built-in default.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Days, Local, NaiveDate};
use corpact::FetchConfig;

pub const ENV_OUT_DIR: &str = "CORPACT_OUT_DIR";
pub const ENV_BASE_URL: &str = "CORPACT_BASE_URL";
pub const ENV_MAX_RETRIES: &str = "CORPACT_MAX_RETRIES";

pub const DEFAULT_CSV_FILE: &str = "corporate_actions_upcoming.csv";
pub const DEFAULT_JSON_FILE: &str = "corporate_actions.json";
pub const DEFAULT_HTML_FILE: &str = "index.html";
pub const DEFAULT_WINDOW_DAYS: u64 = 30;

/// Where the pipeline reads and writes its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub out_dir: PathBuf,
    pub csv_file: String,
    pub json_file: String,
    pub html_file: String,
}

impl PipelineConfig {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            csv_file: DEFAULT_CSV_FILE.to_string(),
            json_file: DEFAULT_JSON_FILE.to_string(),
            html_file: DEFAULT_HTML_FILE.to_string(),
        }
    }

    /// Resolve the output directory from a flag or `CORPACT_OUT_DIR`.
    pub fn resolve(explicit_out_dir: Option<&Path>) -> Self {
        Self::new(resolve_out_dir(
            explicit_out_dir,
            std::env::var(ENV_OUT_DIR).ok(),
        ))
    }

    pub fn csv_path(&self) -> PathBuf {
        self.out_dir.join(&self.csv_file)
    }

    pub fn json_path(&self) -> PathBuf {
        self.out_dir.join(&self.json_file)
    }

    pub fn html_path(&self) -> PathBuf {
        self.out_dir.join(&self.html_file)
    }
}

fn resolve_out_dir(explicit: Option<&Path>, env_value: Option<String>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env_value {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("."),
    }
}

/// Flags that can override the fetcher defaults.
#[derive(Debug, Clone, Default)]
pub struct FetchOverrides {
    pub base_url: Option<String>,
    pub max_retries: Option<u32>,
    pub no_pause: bool,
}

/// Build the fetcher configuration from flags and the environment.
pub fn resolve_fetch_config(overrides: &FetchOverrides) -> Result<FetchConfig> {
    fetch_config_with(
        overrides,
        std::env::var(ENV_BASE_URL).ok(),
        std::env::var(ENV_MAX_RETRIES).ok(),
    )
}

fn fetch_config_with(
    overrides: &FetchOverrides,
    env_base_url: Option<String>,
    env_max_retries: Option<String>,
) -> Result<FetchConfig> {
    let mut config = FetchConfig::default();

    if let Some(url) = overrides.base_url.clone().or(env_base_url) {
        config.base_url = url;
    }

    match (overrides.max_retries, env_max_retries) {
        (Some(n), _) => config.max_retries = n,
        (None, Some(raw)) => {
            config.max_retries = raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{ENV_MAX_RETRIES} must be a positive integer, got {raw:?}"))?;
        }
        (None, None) => {}
    }
    if config.max_retries == 0 {
        bail!("max retries must be at least 1");
    }

    if overrides.no_pause {
        config = config.without_pauses();
    }
    Ok(config)
}

/// Inclusive date range requested from the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Resolve `--from`/`--to`/`--days`. `from` defaults to today and `to`
    /// to `from + days` (30 by default).
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        days: Option<u64>,
        today: NaiveDate,
    ) -> Result<Self> {
        let from = from.unwrap_or(today);
        let to = match to {
            Some(to) => to,
            None => {
                let days = days.unwrap_or(DEFAULT_WINDOW_DAYS);
                from.checked_add_days(Days::new(days))
                    .with_context(|| format!("date window of {days} days is out of range"))?
            }
        };
        if to < from {
            bail!("end date {to} is before start date {from}");
        }
        Ok(Self { from, to })
    }
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
