//! Error type for cache file parsing.

/// Errors produced while reading a single cache file.
///
/// These carry no path context; the merge layer wraps them with the
/// offending file's path when it reports upward.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The file does not start with the cache magic bytes.
    #[error("bad magic bytes {found:02x?}, not a pipeline state cache")]
    BadMagic {
        /// The four bytes actually found at the start of the file.
        found: [u8; 4],
    },

    /// The header carries a cache version this build does not know.
    #[error("unsupported cache version {version}")]
    UnsupportedVersion {
        /// The version number found in the header.
        version: u32,
    },

    /// The header's entry size cannot hold the version's key and checksum.
    #[error("entry size {entry_size} is too small for version {version} records")]
    BadEntrySize {
        /// The version from the header.
        version: u32,
        /// The entry size from the header.
        entry_size: u32,
    },

    /// The file ends in the middle of a record.
    #[error("truncated entry: expected {expected} bytes, found {actual}")]
    TruncatedEntry {
        /// The record size the header promised.
        expected: usize,
        /// The bytes actually remaining.
        actual: usize,
    },

    /// An underlying I/O error while reading.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}
