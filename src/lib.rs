//! DataHub Notify: checksum-tagged status lines for DataHub ingestion
//!
//! Whenever an alert changes state, a single status line is written to a
//! DataHub server:
//!
//! ```text
//! tag=<tag> <unix seconds> <value> <CHECKSUM_HEX>
//! ```
//!
//! The checksum is a table-driven 32-bit digest over the tag, timestamp,
//! value and a per-destination secret key. Both the table and the keys come
//! from a sectioned configuration file loaded at startup.
//!
//! # Features
//!
//! - **Checksum Engine**: MSB-first table-driven digest, one-shot or incremental
//! - **Key Store**: per `server:port` secrets, case-insensitive on the server
//! - **Config Loader**: fail-open parsing with collected warnings
//! - **Shared Snapshot**: versioned configuration that can be reloaded atomically
//! - **Notifier**: trigger/resolve selection and HTTP delivery
//!
//! # Example
//!
//! ```no_run
//! use datahub_notify::config::ConfigLoader;
//! use datahub_notify::line::LineEncoder;
//!
//! let loaded = ConfigLoader::new("conf/localDefaults.ini").load();
//! let key = loaded.config.keys.resolve("scbosco1", "9080");
//!
//! let encoder = LineEncoder::new(&loaded.config.table).unwrap();
//! let line = encoder.encode("PUMP_TRIP", 1_700_000_000, "1", key);
//! println!("{}", line);
//! ```

pub mod alerts;
pub mod checksum;
pub mod config;
pub mod line;

// Re-export commonly used types
pub use alerts::{AlertState, DatahubNotifier, DatahubSettings, NotifierError, NotifierOptions};
pub use checksum::{checksum, ChecksumError, ChecksumTable};
pub use config::{ConfigLoader, DatahubConfig, KeyStore, LoadStatus, SharedConfig};
pub use line::{EncodeError, LineEncoder, StatusLine};

#[cfg(test)]
pub(crate) mod testutil {
    use crate::checksum::ChecksumTable;

    /// MSB-first table for polynomial 0x04C11DB7
    pub fn reference_table() -> ChecksumTable {
        let words = (0..256u32)
            .map(|i| {
                let mut crc = i << 24;
                for _ in 0..8 {
                    crc = if crc & 0x8000_0000 != 0 {
                        (crc << 1) ^ 0x04C1_1DB7
                    } else {
                        crc << 1
                    };
                }
                crc
            })
            .collect();
        ChecksumTable::new(words)
    }

    /// `[datahub-crctable]` section holding [`reference_table`], eight words per line
    pub fn reference_config_text() -> String {
        let mut text = String::from("[datahub-crctable]\n");
        for row in reference_table().words().chunks(8) {
            let row: Vec<String> = row.iter().map(|w| format!("{:08X}", w)).collect();
            text.push_str(&row.join(" "));
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_reference_table_matches_shipped_config() {
        let loaded = crate::config::loader::parse(include_str!("../conf/localDefaults.ini"));
        assert!(loaded.warnings.is_empty(), "{:?}", loaded.warnings);
        assert_eq!(loaded.config.table, reference_table());
        assert_eq!(loaded.config.table.words()[1], 0x04C1_1DB7);
        assert_eq!(loaded.config.keys.hosts(), vec!["scbosco1", "scbosco2"]);
    }
}
