//! Versioned configuration snapshot
//!
//! Readers take an `Arc` to the current snapshot and keep using it for as long
//! as they need; a reload builds a complete replacement before swapping it in,
//! so no reader ever observes a partially built table.

use std::sync::Arc;

use parking_lot::RwLock;

use super::{ConfigLoader, DatahubConfig, LoadStatus, LoadedConfig, ParseWarning};

/// Immutable configuration at a given version
#[derive(Debug)]
pub struct ConfigSnapshot {
    pub version: u64,
    pub config: DatahubConfig,
    pub status: LoadStatus,
    pub warnings: Vec<ParseWarning>,
}

/// Process-wide handle to the current configuration
#[derive(Debug)]
pub struct SharedConfig {
    current: RwLock<Arc<ConfigSnapshot>>,
}

impl SharedConfig {
    /// Create from a freshly loaded configuration (version 1)
    pub fn new(loaded: LoadedConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(ConfigSnapshot {
                version: 1,
                config: loaded.config,
                status: loaded.status,
                warnings: loaded.warnings,
            })),
        }
    }

    /// Create from an in-memory configuration
    pub fn from_config(config: DatahubConfig) -> Self {
        Self::new(LoadedConfig {
            config,
            status: LoadStatus::Configured,
            warnings: Vec::new(),
        })
    }

    /// Load from a file
    pub fn load(loader: &ConfigLoader) -> Self {
        Self::new(loader.load())
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        self.current.read().clone()
    }

    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Swap in a new configuration, returning the new version
    pub fn replace(&self, loaded: LoadedConfig) -> u64 {
        let mut current = self.current.write();
        let version = current.version + 1;
        *current = Arc::new(ConfigSnapshot {
            version,
            config: loaded.config,
            status: loaded.status,
            warnings: loaded.warnings,
        });
        version
    }

    /// Reload from a file and swap it in, returning the new version
    pub fn reload(&self, loader: &ConfigLoader) -> u64 {
        let loaded = loader.load();
        let version = self.replace(loaded);
        tracing::info!(
            path = %loader.path().display(),
            version,
            "Reloaded DataHub configuration"
        );
        version
    }
}
