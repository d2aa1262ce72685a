//! Checksum lookup table
//!
//! The table is supplied externally (from the `[datahub-crctable]` section of the
//! configuration file) and is authoritative: it is never checked against a
//! reference polynomial.

use super::ChecksumError;

/// Ordered lookup table driving the byte-wise digest update.
///
/// Any number of words may be held so that a partially loaded table can be
/// reported on, but only a table of exactly [`ChecksumTable::LEN`] words can be
/// used to compute a checksum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumTable {
    words: Vec<u32>,
}

impl ChecksumTable {
    /// Number of words a usable table holds
    pub const LEN: usize = 256;

    /// Create a table from words in file order
    pub fn new(words: Vec<u32>) -> Self {
        Self { words }
    }

    /// Create an empty (not initialized) table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a word to the end of the table
    pub fn push(&mut self, word: u32) {
        self.words.push(word);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether the table holds exactly 256 words
    pub fn is_complete(&self) -> bool {
        self.words.len() == Self::LEN
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Borrow the table as a fixed 256-word array.
    ///
    /// An empty table reports [`ChecksumError::NotInitialized`]; any other
    /// length than 256 reports [`ChecksumError::InvalidLength`].
    pub fn as_array(&self) -> Result<&[u32; 256], ChecksumError> {
        if self.words.is_empty() {
            return Err(ChecksumError::NotInitialized);
        }
        self.words
            .as_slice()
            .try_into()
            .map_err(|_| ChecksumError::InvalidLength(self.words.len()))
    }

    /// Compute the checksum of `data` against this table
    pub fn checksum(&self, data: &[u8]) -> Result<u32, ChecksumError> {
        Ok(super::checksum(data, self.as_array()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::reference_table;

    #[test]
    fn test_empty_table_not_initialized() {
        let table = ChecksumTable::empty();
        assert!(table.is_empty());
        assert!(!table.is_complete());
        assert!(matches!(table.as_array(), Err(ChecksumError::NotInitialized)));
        assert!(matches!(
            table.checksum(b"anything"),
            Err(ChecksumError::NotInitialized)
        ));
    }

    #[test]
    fn test_short_table_rejected() {
        let table = ChecksumTable::new(vec![0u32; 255]);
        assert!(matches!(
            table.checksum(b"x"),
            Err(ChecksumError::InvalidLength(255))
        ));
    }

    #[test]
    fn test_long_table_rejected() {
        let table = ChecksumTable::new(vec![0u32; 257]);
        assert!(matches!(
            table.as_array(),
            Err(ChecksumError::InvalidLength(257))
        ));
    }

    #[test]
    fn test_push_builds_complete_table() {
        let mut table = ChecksumTable::empty();
        for word in reference_table().words() {
            table.push(*word);
        }
        assert!(table.is_complete());
        assert_eq!(table, reference_table());
        assert_eq!(table.checksum(b"123456789").unwrap(), 0xFC89_1918);
    }
}
