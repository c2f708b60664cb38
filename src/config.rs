//! Runtime settings.
//!
//! With the `config` feature, settings are read from a TOML file (by default
//! `<config dir>/clientdesk/config.toml`). Missing keys take their defaults and
//! a missing default file yields [`Settings::default`].

use crate::directory::DEFAULT_SEED;
use crate::query::{DEFAULT_LATENCY, DEFAULT_SEARCH_LIMIT};
use crate::search::{ChildPrefetch, SearchConfig, DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub page_size: usize,
    pub debounce_ms: u64,
    /// Artificial delay added to every directory call
    pub latency_ms: u64,
    pub search_limit: usize,
    pub child_prefetch: ChildPrefetch,
    pub seed: u64,
    /// Where the directory snapshot lives; no persistence when unset
    pub snapshot_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            latency_ms: DEFAULT_LATENCY.as_millis() as u64,
            search_limit: DEFAULT_SEARCH_LIMIT,
            child_prefetch: ChildPrefetch::default(),
            seed: DEFAULT_SEED,
            snapshot_path: None,
        }
    }
}

impl Settings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            page_size: self.page_size,
            debounce: Duration::from_millis(self.debounce_ms),
            child_prefetch: self.child_prefetch,
        }
    }
}

#[cfg(feature = "config")]
mod file {
    use super::Settings;
    use crate::error::{ClientsError, Result};
    use std::path::{Path, PathBuf};

    impl Settings {
        /// Default settings file location, if the platform has a config dir.
        pub fn default_path() -> Option<PathBuf> {
            dirs::config_dir().map(|dir| dir.join("clientdesk").join("config.toml"))
        }

        pub fn from_toml(raw: &str) -> Result<Self> {
            toml::from_str(raw).map_err(|err| ClientsError::config(err.to_string()))
        }

        /// Load settings from an explicit file, which must exist.
        pub fn load(path: &Path) -> Result<Self> {
            if !path.exists() {
                return Err(ClientsError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            let raw = std::fs::read_to_string(path).map_err(|err| {
                ClientsError::storage(format!("failed to read {}", path.display()), err)
            })?;
            Self::from_toml(&raw)
        }

        /// Load from the default location, falling back to defaults when absent.
        pub fn load_default() -> Result<Self> {
            match Self::default_path() {
                Some(path) if path.exists() => Self::load(&path),
                _ => Ok(Self::default()),
            }
        }
    }
}
