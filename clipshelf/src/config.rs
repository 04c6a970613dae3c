//! Runtime configuration.
//!
//! Every field has a working default, so the tool runs with no config file
//! at all. When `<config_dir>/clipshelf/config.toml` exists it is merged
//! over the defaults; an unparseable file falls back to defaults with a
//! warning. No environment variables are consulted.

use std::path::PathBuf;
use std::time::Duration;

use log::warn;
use serde::Deserialize;

use crate::store::{HistoryStore, DEFAULT_MAX_ENTRIES, DEFAULT_RECENT_WINDOW_SECS};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backing file for history, one codec line per entry.
    pub history_path: PathBuf,
    /// Trim threshold for stored entries.
    pub max_entries: usize,
    /// Trailing window (days) preferred during trims.
    pub recent_window_days: u32,
    /// Poller sampling interval.
    pub poll_interval_ms: u64,
    /// Rows the picker renders per refresh.
    pub display_cap: usize,
}

impl Default for Config {
    fn default() -> Self {
        let history_path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clipshelf")
            .join("history");
        Self {
            history_path,
            max_entries: DEFAULT_MAX_ENTRIES,
            recent_window_days: (DEFAULT_RECENT_WINDOW_SECS / 86400) as u32,
            poll_interval_ms: 800,
            display_cap: 15,
        }
    }
}

impl Config {
    /// Load the user config file when present, defaults otherwise.
    pub fn load() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_default()
            .join("clipshelf")
            .join("config.toml");
        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// A store honoring the configured path and retention limits.
    pub fn store(&self) -> HistoryStore {
        HistoryStore::with_limits(
            self.history_path.clone(),
            self.max_entries,
            i64::from(self.recent_window_days) * 86400,
        )
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
