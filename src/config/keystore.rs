//! Per-destination secret keys

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// What to do when no key is configured for a destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// Mix an empty key into the checksum and carry on
    #[default]
    Permissive,
    /// Refuse to encode without a key
    Strict,
}

/// Mapping from `lowercase(host):port` to a secret key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyStore {
    entries: HashMap<String, String>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a `host:port` entry, returning the secret it replaced.
    ///
    /// The host part (text before the first `:`) is lowercased so that it
    /// matches [`KeyStore::resolve`]; the port is stored as written.
    pub fn insert(&mut self, hostport: &str, key: impl Into<String>) -> Option<String> {
        self.entries.insert(normalize_hostport(hostport), key.into())
    }

    /// Look up the key for a destination
    pub fn lookup(&self, server: &str, port: &str) -> Option<&str> {
        self.entries
            .get(&lookup_key(server, port))
            .map(String::as_str)
    }

    /// Resolve the key for a destination, or `""` when none is configured
    pub fn resolve(&self, server: &str, port: &str) -> &str {
        self.lookup(server, port).unwrap_or("")
    }

    /// Resolve the key for a destination under the given policy
    pub fn resolve_with(
        &self,
        server: &str,
        port: &str,
        policy: MissingKeyPolicy,
    ) -> Result<&str, KeyError> {
        match (self.lookup(server, port), policy) {
            (Some(key), _) => Ok(key),
            (None, MissingKeyPolicy::Permissive) => Ok(""),
            (None, MissingKeyPolicy::Strict) => Err(KeyError::Missing {
                server: server.to_string(),
                port: port.to_string(),
            }),
        }
    }

    /// Distinct host names with a configured key, sorted
    pub fn hosts(&self) -> Vec<String> {
        self.entries
            .keys()
            .map(|hostport| hostport.split(':').next().unwrap_or_default().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn lookup_key(server: &str, port: &str) -> String {
    format!("{}:{}", server.to_lowercase(), port)
}

fn normalize_hostport(hostport: &str) -> String {
    match hostport.split_once(':') {
        Some((host, port)) => lookup_key(host, port),
        None => hostport.to_lowercase(),
    }
}

/// Key resolution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("No key configured for {server}:{port}")]
    Missing { server: String, port: String },
}
