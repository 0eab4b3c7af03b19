//! Per-version record layouts.
//!
//! The cache version in the header selects how each fixed-size record is
//! split into key, payload, and checksum. The mapping is a table so new
//! versions slot in without touching the reader or the merge engine.

use pscache_common::CHECKSUM_SIZE;

/// The cache version this build writes by default.
pub const CURRENT_VERSION: u32 = 5;

/// How one record is split into key, payload, and checksum.
///
/// A record is `key ‖ payload ‖ checksum`. Key and checksum lengths are
/// fixed by the version; the payload takes whatever the header's entry
/// size leaves over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLayout {
    /// Byte length of the embedded entry key.
    pub key_len: usize,
    /// Byte length of the trailing checksum.
    pub checksum_len: usize,
}

impl EntryLayout {
    /// Minimum entry size this layout can inhabit (key + checksum, with
    /// an empty payload).
    pub fn min_entry_size(&self) -> usize {
        self.key_len + self.checksum_len
    }

    /// Payload length for a given total entry size.
    ///
    /// Callers must have validated `entry_size >= min_entry_size()`
    /// (header validation does this).
    pub fn payload_len(&self, entry_size: usize) -> usize {
        entry_size - self.key_len - self.checksum_len
    }
}

/// Looks up the record layout for a cache version.
///
/// Returns `None` for versions this build does not understand; the
/// header reader turns that into `FormatError::UnsupportedVersion`.
pub fn layout_for(version: u32) -> Option<EntryLayout> {
    match version {
        4 => Some(EntryLayout {
            key_len: 16,
            checksum_len: CHECKSUM_SIZE,
        }),
        5 => Some(EntryLayout {
            key_len: 20,
            checksum_len: CHECKSUM_SIZE,
        }),
        _ => None,
    }
}
