//! Configuration for the daylist server.
//!
//! Settings are read from an optional `daylist.yaml` in the working
//! directory; every field has a default matching the original deployment
//! constants, so the file can be absent or partial.

use crate::error::Result;
use crate::model::DateOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file name, relative to the working directory.
pub const CONFIG_FILE_PATH: &str = "daylist.yaml";

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// How long a computed grouping stays valid, in seconds. Zero disables
    /// caching and recomputes on every page view.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Direction dates run in, both in the store's `ORDER BY` and across
    /// groups on the page.
    #[serde(default)]
    pub date_order: DateOrder,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("todos.db")
}

fn default_bind_addr() -> String {
    "127.0.0.1:5050".to_string()
}

const fn default_cache_ttl_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            bind_addr: default_bind_addr(),
            cache_ttl_secs: default_cache_ttl_secs(),
            date_order: DateOrder::default(),
        }
    }
}

impl Config {
    /// Load config from the working directory, falling back to defaults if
    /// no config file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Load config from a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Self> {
        let config_path = base_dir.join(CONFIG_FILE_PATH);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// The cache TTL as a [`Duration`].
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
