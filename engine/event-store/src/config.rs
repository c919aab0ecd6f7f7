//! Configuration for the event store

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the event store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one CSV file per stored table
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("./data/events") }
    }
}

impl StoreConfig {
    /// Create a new configuration with custom data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// File backing the table stored under `key`
    pub fn table_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.csv"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
