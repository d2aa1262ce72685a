//! Table-driven 32-bit checksum
//!
//! Bytes are processed most-significant-bit first against an externally
//! supplied 256-word table:
//!
//! ```text
//! crc = 0xFFFFFFFF
//! for b in data: crc = table[((crc >> 24) ^ b) & 0xFF] ^ (crc << 8)
//! return crc ^ 0xFFFFFFFF
//! ```
//!
//! This is not the reflected IEEE CRC-32. The receiving system validates
//! against whatever table it was provisioned with, so the table must be used
//! exactly as loaded.

pub mod table;

pub use table::ChecksumTable;

const CRC_INIT: u32 = 0xFFFF_FFFF;
const CRC_XOR_OUT: u32 = 0xFFFF_FFFF;

/// Compute the checksum of `data` in one shot
pub fn checksum(data: &[u8], table: &[u32; 256]) -> u32 {
    let mut hasher = Crc32::new(table);
    hasher.update(data);
    hasher.finalize()
}

/// Incremental checksum over multiple byte slices.
///
/// Feeding the same bytes in any chunking yields the same digest as
/// [`checksum`] over their concatenation.
#[derive(Debug, Clone)]
pub struct Crc32<'a> {
    table: &'a [u32; 256],
    crc: u32,
}

impl<'a> Crc32<'a> {
    pub fn new(table: &'a [u32; 256]) -> Self {
        Self {
            table,
            crc: CRC_INIT,
        }
    }

    /// Feed more bytes into the digest
    pub fn update(&mut self, data: &[u8]) {
        let mut crc = self.crc;
        for &byte in data {
            let index = ((crc >> 24) ^ u32::from(byte)) & 0xFF;
            crc = self.table[index as usize] ^ (crc << 8);
        }
        self.crc = crc;
    }

    /// Finish the digest
    pub fn finalize(self) -> u32 {
        self.crc ^ CRC_XOR_OUT
    }
}

/// Checksum errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChecksumError {
    #[error("Checksum table not initialized")]
    NotInitialized,

    #[error("Checksum table has {0} entries, expected 256")]
    InvalidLength(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::reference_table;

    #[test]
    fn test_empty_input_is_zero() {
        let table = reference_table();
        assert_eq!(checksum(b"", table.as_array().unwrap()), 0);

        // Holds for any table, the update loop never runs
        assert_eq!(checksum(b"", &[0xDEAD_BEEF; 256]), 0);
    }

    #[test]
    fn test_golden_vectors() {
        let table = reference_table();
        let table = table.as_array().unwrap();

        assert_eq!(checksum(b"123456789", table), 0xFC89_1918);
        assert_eq!(checksum(b"tag110000000005mykey", table), 0x7D1C_7023);
        assert_eq!(checksum(b"alert1170000000010secret", table), 0xD9C9_4870);
        assert_eq!(checksum(b"a", table), 0x1993_9B6B);
    }

    #[test]
    fn test_deterministic() {
        let table = reference_table();
        let table = table.as_array().unwrap();
        let data = b"pump-trip17000000001k3y";

        let first = checksum(data, table);
        for _ in 0..10 {
            assert_eq!(checksum(data, table), first);
        }
        assert_eq!(first, 0x73C9_2C59);
    }

    #[test]
    fn test_table_is_authoritative() {
        // A zero table reduces the update to `crc << 8`; after one byte only the
        // low eight bits are clear, and the final XOR leaves 0x000000FF.
        let zeros = [0u32; 256];
        assert_eq!(checksum(b"a", &zeros), 0x0000_00FF);
        assert_eq!(checksum(b"abcd", &zeros), 0xFFFF_FFFF);

        // Same input against a different table gives a different digest
        let table = reference_table();
        assert_ne!(
            checksum(b"abcd", &zeros),
            checksum(b"abcd", table.as_array().unwrap())
        );
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let table = reference_table();
        let table = table.as_array().unwrap();

        let mut hasher = Crc32::new(table);
        hasher.update(b"tag1");
        hasher.update(b"1000000000");
        hasher.update(b"");
        hasher.update(b"5");
        hasher.update(b"mykey");

        assert_eq!(hasher.finalize(), checksum(b"tag110000000005mykey", table));
    }

    #[test]
    fn test_high_bytes_wrap() {
        let table = reference_table();
        let table = table.as_array().unwrap();
        let data: Vec<u8> = (0..=255u8).rev().collect();

        // Left shifts discard the top byte every step
        assert_eq!(checksum(&data, table), 0x2801_925A);
    }
}
