//! Status line encoding
//!
//! Wire format, one line per notification:
//!
//! ```text
//! tag=<tag> <unix seconds> <value> <CHECKSUM_HEX>
//! ```
//!
//! The checksum covers `tag`, the decimal timestamp, `value` and the
//! destination key concatenated with no delimiters. The key itself is never
//! sent.

use std::fmt;

use crate::checksum::{ChecksumError, ChecksumTable, Crc32};
use crate::config::KeyError;

/// A single encoded status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub tag: String,
    pub timestamp: i64,
    pub value: String,
    pub checksum: u32,
}

impl StatusLine {
    /// Uppercase hex digest, no `0x` prefix and no zero padding
    pub fn checksum_hex(&self) -> String {
        format!("{:X}", self.checksum)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tag={} {} {} {:X}",
            self.tag, self.timestamp, self.value, self.checksum
        )
    }
}

/// Encodes status lines against a complete checksum table.
///
/// The tag is not validated here; empty tags are rejected when the notifier
/// settings are built.
#[derive(Debug, Clone, Copy)]
pub struct LineEncoder<'a> {
    table: &'a [u32; 256],
}

impl<'a> LineEncoder<'a> {
    /// Fails if the table is not exactly 256 words
    pub fn new(table: &'a ChecksumTable) -> Result<Self, ChecksumError> {
        Ok(Self {
            table: table.as_array()?,
        })
    }

    /// Build the status line for a notification
    pub fn status_line(&self, tag: &str, timestamp: i64, value: &str, key: &str) -> StatusLine {
        let timestamp_text = timestamp.to_string();

        let mut hasher = Crc32::new(self.table);
        hasher.update(tag.as_bytes());
        hasher.update(timestamp_text.as_bytes());
        hasher.update(value.as_bytes());
        hasher.update(key.as_bytes());

        StatusLine {
            tag: tag.to_string(),
            timestamp,
            value: value.to_string(),
            checksum: hasher.finalize(),
        }
    }

    /// Encode straight to the wire string
    pub fn encode(&self, tag: &str, timestamp: i64, value: &str, key: &str) -> String {
        self.status_line(tag, timestamp, value, key).to_string()
    }
}

/// Errors preventing a line from being encoded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Checksum(#[from] ChecksumError),

    #[error(transparent)]
    Key(#[from] KeyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::reference_table;
    use regex::Regex;

    #[test]
    fn test_encode_wire_format() {
        let table = reference_table();
        let encoder = LineEncoder::new(&table).unwrap();

        let line = encoder.encode("alert1", 1_700_000_000, "10", "secret");
        assert_eq!(line, "tag=alert1 1700000000 10 D9C94870");

        let pattern = Regex::new(r"^tag=alert1 1700000000 10 [0-9A-F]+$").unwrap();
        assert!(pattern.is_match(&line));
    }

    #[test]
    fn test_golden_vector_fields() {
        let table = reference_table();
        let encoder = LineEncoder::new(&table).unwrap();

        let line = encoder.status_line("tag1", 1_000_000_000, "5", "mykey");
        assert_eq!(line.checksum, 0x7D1C_7023);
        assert_eq!(line.checksum_hex(), "7D1C7023");
        assert_eq!(line.to_string(), "tag=tag1 1000000000 5 7D1C7023");
    }

    #[test]
    fn test_key_changes_checksum_not_line_layout() {
        let table = reference_table();
        let encoder = LineEncoder::new(&table).unwrap();

        let keyed = encoder.status_line("alert1", 1_700_000_000, "10", "secret");
        let unkeyed = encoder.status_line("alert1", 1_700_000_000, "10", "");

        assert_ne!(keyed.checksum, unkeyed.checksum);
        assert_eq!(unkeyed.checksum_hex(), "BED4A588");
        assert!(!keyed.to_string().contains("secret"));
    }

    #[test]
    fn test_hex_not_zero_padded() {
        let table = ChecksumTable::new(vec![0u32; 256]);
        let encoder = LineEncoder::new(&table).unwrap();

        // Zero table: the digest is 0xFF for any single byte of hashed input
        let line = encoder.status_line("", 1, "", "");
        assert_eq!(line.checksum, 0xFF);
        assert_eq!(line.to_string(), "tag= 1  FF");
    }

    #[test]
    fn test_negative_timestamp() {
        let table = reference_table();
        let encoder = LineEncoder::new(&table).unwrap();

        let line = encoder.status_line("t", -5, "v", "k");
        let mut hasher = Crc32::new(table.as_array().unwrap());
        hasher.update(b"t-5vk");
        assert_eq!(line.checksum, hasher.finalize());
        assert!(line.to_string().starts_with("tag=t -5 v "));
    }

    #[test]
    fn test_encoder_requires_complete_table() {
        assert!(matches!(
            LineEncoder::new(&ChecksumTable::empty()),
            Err(ChecksumError::NotInitialized)
        ));
        assert!(matches!(
            LineEncoder::new(&ChecksumTable::new(vec![1, 2, 3])),
            Err(ChecksumError::InvalidLength(3))
        ));
    }
}
