//! Store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::store::default_db_path;

/// Settings used by [`crate::HttpLogStore::open`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file; falls back to `~/.netlog/netlog.db`
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    /// Pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Use the WAL journal
    #[serde(default = "default_wal")]
    pub wal: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_wal() -> bool {
    true
}

impl StoreConfig {
    /// Config pointing at a specific database file
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Resolved database path
    #[must_use]
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(default_db_path)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            max_connections: default_max_connections(),
            wal: default_wal(),
        }
    }
}
