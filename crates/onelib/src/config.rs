//! Library configuration

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dom::DomServiceConfig;
use serde::{Deserialize, Serialize};

use crate::dates::DEFAULT_DATE_FORMAT;
use crate::error::Result;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use crate::text::DEFAULT_TRUNCATE_LENGTH;

/// Where `save`/`load` keep their entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Lost when the process exits
    Memory,
    /// One JSON file, kept across runs
    File { path: PathBuf },
}

impl StorageConfig {
    pub fn open(&self) -> Result<Arc<dyn KeyValueStore>> {
        Ok(match self {
            StorageConfig::Memory => Arc::new(MemoryStore::new()),
            StorageConfig::File { path } => Arc::new(FileStore::open(path)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OneLibConfig {
    /// Length used by `OneLib::truncate`
    pub truncate_length: usize,
    /// Template used by `OneLib::format`
    pub date_format: String,
    pub storage: StorageConfig,
    pub dom: DomServiceConfig,
}

impl Default for OneLibConfig {
    fn default() -> Self {
        Self {
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            storage: StorageConfig::Memory,
            dom: DomServiceConfig::default(),
        }
    }
}

impl OneLibConfig {
    /// Read a JSON config file; missing fields take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
