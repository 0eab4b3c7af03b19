//! Record integrity checksums.

use std::fmt;

/// Size of a stored checksum in bytes (XXH3-128).
pub const CHECKSUM_SIZE: usize = 16;

/// A 128-bit XXH3 checksum over an entry's key and payload.
///
/// Checksums exist purely to detect on-disk corruption. They are never
/// used for entry identity — two entries with equal keys are duplicates
/// regardless of what their checksums say.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Checksum([u8; CHECKSUM_SIZE]);

impl Checksum {
    /// Computes the checksum of an entry from its key and payload bytes.
    pub fn compute(key: &[u8], payload: &[u8]) -> Self {
        let mut hasher = xxhash_rust::xxh3::Xxh3::new();
        hasher.update(key);
        hasher.update(payload);
        Self(hasher.digest128().to_le_bytes())
    }

    /// Wraps raw bytes read from disk. Returns `None` unless exactly
    /// [`CHECKSUM_SIZE`] bytes are supplied.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let array: [u8; CHECKSUM_SIZE] = bytes.try_into().ok()?;
        Some(Self(array))
    }

    /// Returns the checksum's on-disk byte representation.
    pub fn as_bytes(&self) -> &[u8; CHECKSUM_SIZE] {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}
