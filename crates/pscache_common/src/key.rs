//! Entry identity keys.

use std::fmt;

/// The identity of one cache entry.
///
/// A `Key` is the pipeline-configuration hash embedded in each on-disk
/// record. It is read as-is, never recomputed from the payload. Key
/// equality — not full-record byte equality — is what makes two entries
/// "the same" during a merge. Its length is fixed by the cache version,
/// so it is stored as an owned byte vector rather than a fixed array.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Key(Vec<u8>);

impl Key {
    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// Returns the key's raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the key length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the key is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [a, b, ..] => write!(f, "Key({a:02x}{b:02x}..)"),
            _ => write!(f, "Key(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_is_byte_equality() {
        let a = Key::from_bytes(&[1, 2, 3, 4]);
        let b = Key::from_bytes(&[1, 2, 3, 4]);
        let c = Key::from_bytes(&[1, 2, 3, 5]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn usable_in_hash_set() {
        let mut seen = HashSet::new();
        assert!(seen.insert(Key::from_bytes(&[0xAA; 20])));
        assert!(!seen.insert(Key::from_bytes(&[0xAA; 20])));
        assert!(seen.insert(Key::from_bytes(&[0xBB; 20])));
    }

    #[test]
    fn display_is_lowercase_hex() {
        let key = Key::from_bytes(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(key.to_string(), "deadbeef");
    }

    #[test]
    fn debug_abbreviated() {
        let key = Key::from_bytes(&[0x01, 0x02, 0x03]);
        assert_eq!(format!("{key:?}"), "Key(0102..)");
    }

    #[test]
    fn len_and_empty() {
        assert_eq!(Key::from_bytes(&[0; 16]).len(), 16);
        assert!(Key::from_bytes(&[]).is_empty());
    }
}
