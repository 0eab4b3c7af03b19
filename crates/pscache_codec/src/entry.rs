//! Cache entries: decode, encode, and integrity validation.

use std::io::Write;

use pscache_common::{Checksum, Key};

use crate::error::FormatError;
use crate::header::CacheHeader;

/// One pipeline-state record: an embedded identity key, an opaque
/// payload, and an integrity checksum over both.
///
/// Entries are immutable once read; the merge engine only copies or
/// discards them. The payload is never inspected — this tool does not
/// understand shader state, it only dedups and transports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The entry's identity.
    pub key: Key,
    /// Opaque pipeline-state bytes.
    pub payload: Vec<u8>,
    /// Stored checksum over key and payload.
    pub checksum: Checksum,
}

impl CacheEntry {
    /// Builds a fresh entry, computing its checksum from key and payload.
    pub fn new(key: Key, payload: Vec<u8>) -> Self {
        let checksum = Checksum::compute(key.as_bytes(), &payload);
        Self {
            key,
            payload,
            checksum,
        }
    }

    /// Splits a raw record into key, payload, and checksum per the
    /// header's version layout. Pure, no I/O.
    ///
    /// The raw slice must be exactly `header.entry_size` bytes — the
    /// record reader guarantees this. The checksum is taken as stored;
    /// call [`CacheEntry::is_valid`] to verify it.
    pub fn decode(raw: &[u8], header: &CacheHeader) -> Result<Self, FormatError> {
        let layout = header.layout().ok_or(FormatError::UnsupportedVersion {
            version: header.version,
        })?;
        if raw.len() != header.entry_size as usize {
            return Err(FormatError::TruncatedEntry {
                expected: header.entry_size as usize,
                actual: raw.len(),
            });
        }

        let (key_bytes, rest) = raw.split_at(layout.key_len);
        let (payload, checksum_bytes) = rest.split_at(rest.len() - layout.checksum_len);

        // from_bytes only fails on a length mismatch, which the layout
        // table rules out for supported versions.
        let checksum = Checksum::from_bytes(checksum_bytes).ok_or(FormatError::BadEntrySize {
            version: header.version,
            entry_size: header.entry_size,
        })?;

        Ok(Self {
            key: Key::from_bytes(key_bytes),
            payload: payload.to_vec(),
            checksum,
        })
    }

    /// Recomputes the checksum over key and payload and compares it to
    /// the stored one. A `false` result means on-disk corruption.
    pub fn is_valid(&self) -> bool {
        Checksum::compute(self.key.as_bytes(), &self.payload) == self.checksum
    }

    /// Serializes the entry in record layout: key, payload, checksum.
    /// Append-only, no seeking.
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<(), FormatError> {
        writer.write_all(self.key.as_bytes())?;
        writer.write_all(&self.payload)?;
        writer.write_all(self.checksum.as_bytes())?;
        Ok(())
    }

    /// Total encoded size of this entry in bytes.
    pub fn encoded_size(&self) -> usize {
        self.key.len() + self.payload.len() + pscache_common::CHECKSUM_SIZE
    }
}
