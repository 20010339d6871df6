//! # App Configuration Module
//!
//! This module handles loading and managing configuration for the TutorBook launch.
//! It retrieves configuration values from environment variables (optionally via a
//! `.env` file loaded by the binary) and provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! The following environment variables are used:
//!
//! - `TUTORBOOK_DATA_DIR`: Directory holding `persons.json` and `last_updated.json` (default: "data")
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `TUTORBOOK_REMIND_HOURS`: How far ahead upcoming lessons are listed at launch (default: 48,
//!   at most one year)

use std::env;
use std::path::PathBuf;

use eyre::{Result, eyre};
use tracing::Level;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_REMIND_HOURS: i64 = 48;
/// One year; longer reminder windows fall back to the default.
pub const MAX_REMIND_HOURS: i64 = 24 * 366;

/// Configuration for a TutorBook launch
///
/// # Example
///
/// ```
/// use eyre::Result;
/// use tutorbook_app::config::AppConfig;
///
/// fn example() -> Result<()> {
///     let config = AppConfig::from_env()?;
///     println!("Reading roster from {}", config.data_dir.display());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory the JSON store reads from and writes to
    pub data_dir: PathBuf,

    /// Log level for the application
    pub log_level: Level,

    /// Lessons starting within this many hours of launch are listed as reminders
    pub remind_window_hours: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_level: Level::INFO,
            remind_window_hours: DEFAULT_REMIND_HOURS,
        }
    }
}

impl AppConfig {
    /// Creates a new AppConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if `TUTORBOOK_DATA_DIR` is set but blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Creates a new AppConfig from any key lookup
    ///
    /// `from_env` is this function over the process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Storage settings
        let data_dir = match lookup("TUTORBOOK_DATA_DIR") {
            Some(dir) if dir.trim().is_empty() => {
                return Err(eyre!("TUTORBOOK_DATA_DIR must not be blank"));
            }
            Some(dir) => PathBuf::from(dir.trim()),
            None => PathBuf::from(DEFAULT_DATA_DIR),
        };

        // Logging settings
        let log_level = match lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // Reminder settings
        let remind_window_hours = lookup("TUTORBOOK_REMIND_HOURS")
            .and_then(|hours| hours.trim().parse::<i64>().ok())
            .filter(|hours| (1..=MAX_REMIND_HOURS).contains(hours))
            .unwrap_or(DEFAULT_REMIND_HOURS);

        Ok(Self {
            data_dir,
            log_level,
            remind_window_hours,
        })
    }

    /// Returns the reminder window as a duration
    ///
    /// Hours outside `1..=MAX_REMIND_HOURS` give the default window.
    pub fn remind_window(&self) -> chrono::Duration {
        let hours = if (1..=MAX_REMIND_HOURS).contains(&self.remind_window_hours) {
            self.remind_window_hours
        } else {
            DEFAULT_REMIND_HOURS
        };
        chrono::Duration::hours(hours)
    }
}
