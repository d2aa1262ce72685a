//! Sectioned configuration file loader
//!
//! ```text
//! [datahub-keys]
//! hostA:9080 = secretkey1
//!
//! [datahub-crctable]
//! 00000000 04C11DB7 09823B6E ...
//! ```
//!
//! Loading never fails: an unreadable file yields an empty, not-configured
//! result and every malformed line is reported as a [`ParseWarning`].

use std::path::{Path, PathBuf};

use super::{DatahubConfig, LoadStatus, LoadedConfig};
use crate::checksum::ChecksumTable;

/// Default location of the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "conf/localDefaults.ini";

const KEYS_SECTION: &str = "datahub-keys";
const CRC_TABLE_SECTION: &str = "datahub-crctable";

/// Non-fatal anomaly found while parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseWarning {
    #[error("line {line}: malformed checksum table entry {token:?}")]
    MalformedTableEntry { line: usize, token: String },

    #[error("line {line}: malformed key entry {text:?}")]
    MalformedKeyEntry { line: usize, text: String },

    #[error("line {line}: duplicate key for {hostport}, later definition wins")]
    DuplicateKey { line: usize, hostport: String },

    #[error("checksum table has {found} entries, expected 256")]
    TableLength { found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
    None,
    Keys,
    CrcTable,
    Other(String),
}

impl Section {
    fn from_header(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            KEYS_SECTION => Section::Keys,
            CRC_TABLE_SECTION => Section::CrcTable,
            _ => Section::Other(name),
        }
    }
}

/// Loads the DataHub configuration file
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file.
    ///
    /// A missing or unreadable file is not an error: the result carries
    /// [`LoadStatus::NotConfigured`] with an empty table and key store.
    pub fn load(&self) -> LoadedConfig {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "DataHub configuration not loaded, continuing unconfigured"
                );
                return LoadedConfig::not_configured(e.to_string());
            }
        };

        let loaded = parse(&String::from_utf8_lossy(&bytes));

        for warning in &loaded.warnings {
            tracing::warn!(path = %self.path.display(), "{}", warning);
        }
        tracing::info!(
            path = %self.path.display(),
            keys = loaded.config.keys.len(),
            table_entries = loaded.config.table.len(),
            warnings = loaded.warnings.len(),
            "Loaded DataHub configuration"
        );

        loaded
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_PATH)
    }
}

/// Parse configuration text
pub fn parse(text: &str) -> LoadedConfig {
    let mut config = DatahubConfig::default();
    let mut warnings = Vec::new();
    let mut section = Section::None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = Section::from_header(name);
            continue;
        }

        match &section {
            Section::Keys => parse_key_line(line, line_no, &mut config, &mut warnings),
            Section::CrcTable => {
                parse_table_line(line, line_no, &mut config.table, &mut warnings)
            }
            Section::None | Section::Other(_) => {
                tracing::trace!(line = line_no, section = ?section, "Ignoring line");
            }
        }
    }

    if !config.table.is_complete() && !config.table.is_empty() {
        warnings.push(ParseWarning::TableLength {
            found: config.table.len(),
        });
    }

    LoadedConfig {
        config,
        status: LoadStatus::Configured,
        warnings,
    }
}

fn parse_key_line(
    line: &str,
    line_no: usize,
    config: &mut DatahubConfig,
    warnings: &mut Vec<ParseWarning>,
) {
    let (hostport, key) = match line.split_once('=') {
        Some((hostport, key)) => (hostport.trim(), key.trim()),
        None => (line, ""),
    };

    if hostport.is_empty() || key.is_empty() {
        warnings.push(ParseWarning::MalformedKeyEntry {
            line: line_no,
            text: line.to_string(),
        });
        return;
    }

    if config.keys.insert(hostport, key).is_some() {
        warnings.push(ParseWarning::DuplicateKey {
            line: line_no,
            hostport: hostport.to_string(),
        });
    }
}

fn parse_table_line(
    line: &str,
    line_no: usize,
    table: &mut ChecksumTable,
    warnings: &mut Vec<ParseWarning>,
) {
    for token in line.split_whitespace() {
        match parse_hex_word(token) {
            Some(word) => table.push(word),
            None => warnings.push(ParseWarning::MalformedTableEntry {
                line: line_no,
                token: token.to_string(),
            }),
        }
    }
}

/// Bare base-16 `u32`: no sign, no `0x` prefix
fn parse_hex_word(token: &str) -> Option<u32> {
    if token.starts_with('+') {
        return None;
    }
    u32::from_str_radix(token, 16).ok()
}
