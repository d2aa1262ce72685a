//! DataHub configuration: checksum table and destination keys
//!
//! Loaded once from a sectioned text file by [`ConfigLoader`] and shared
//! read-only afterwards through [`SharedConfig`].

pub mod keystore;
pub mod loader;
pub mod snapshot;

pub use keystore::{KeyError, KeyStore, MissingKeyPolicy};
pub use loader::{ConfigLoader, ParseWarning, DEFAULT_CONFIG_PATH};
pub use snapshot::{ConfigSnapshot, SharedConfig};

use crate::checksum::ChecksumTable;

/// Checksum table and key store for encoding status lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatahubConfig {
    pub table: ChecksumTable,
    pub keys: KeyStore,
}

impl DatahubConfig {
    pub fn new(table: ChecksumTable, keys: KeyStore) -> Self {
        Self { table, keys }
    }
}

/// Whether a configuration file was actually read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file could not be read; table and keys are empty
    NotConfigured { reason: String },
    /// The file was read, possibly with warnings
    Configured,
}

impl LoadStatus {
    pub fn is_configured(&self) -> bool {
        matches!(self, LoadStatus::Configured)
    }
}

/// Result of loading a configuration file
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DatahubConfig,
    pub status: LoadStatus,
    pub warnings: Vec<ParseWarning>,
}

impl LoadedConfig {
    pub fn not_configured(reason: impl Into<String>) -> Self {
        Self {
            config: DatahubConfig::default(),
            status: LoadStatus::NotConfigured {
                reason: reason.into(),
            },
            warnings: Vec::new(),
        }
    }
}
