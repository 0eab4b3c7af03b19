//! Error type for merge runs.

use std::path::PathBuf;

use pscache_codec::FormatError;

/// Fatal errors that abort a whole merge run.
///
/// Per-entry problems (checksum mismatches, a truncated file tail) are
/// absorbed by the engine and surfaced through file reports instead;
/// everything here terminates the run with no output file left behind.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    /// The caller supplied an empty input list.
    #[error("no input files given")]
    NoInputs,

    /// An input file could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Open {
        /// The input path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An input file's header failed validation.
    #[error("invalid cache file {path}: {source}")]
    Format {
        /// The input path.
        path: PathBuf,
        /// The format violation.
        source: FormatError,
    },

    /// A later file's cache version differs from the first file's.
    ///
    /// Versions must match exactly across all inputs — mixing them would
    /// silently mix incompatible payload layouts.
    #[error("version mismatch in {path}: expected {expected}, got {found}")]
    VersionMismatch {
        /// The offending input path.
        path: PathBuf,
        /// The version established by the first file.
        expected: u32,
        /// The version this file carries.
        found: u32,
    },

    /// A later file's record size differs from the first file's.
    #[error("entry size mismatch in {path}: expected {expected}, got {found}")]
    EntrySizeMismatch {
        /// The offending input path.
        path: PathBuf,
        /// The record size established by the first file.
        expected: u32,
        /// The record size this file carries.
        found: u32,
    },

    /// Writing the merged output failed.
    #[error("cannot write {path}: {source}")]
    Write {
        /// The output path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
