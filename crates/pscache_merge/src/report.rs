//! Merge progress reporting.
//!
//! The engine never prints. It emits structured events through a
//! [`MergeObserver`] as the run progresses and returns a [`MergeReport`]
//! at the end; the CLI decides how either becomes console output.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// What happened while merging one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// The input path.
    pub path: PathBuf,

    /// Entries from this file inserted into the store — keys not seen in
    /// any earlier file of this run. Resets per file; the uniqueness
    /// check itself is cumulative across the whole run.
    pub new_count: usize,

    /// Valid entries skipped because their key was already present.
    pub duplicate_count: usize,

    /// Entries dropped for a checksum mismatch.
    pub corrupt_count: usize,

    /// `true` if the file ended mid-record; entries accepted before the
    /// truncation point are kept.
    pub truncated: bool,
}

/// Summary of a completed merge run.
#[derive(Debug, Clone, Serialize)]
pub struct MergeReport {
    /// The cache version shared by all inputs and carried by the output.
    pub version: u32,

    /// Per-file outcomes, in processing order.
    pub files: Vec<FileReport>,

    /// Unique entries written to the output.
    pub total_entries: usize,
}

/// Receives engine events as a merge run progresses.
///
/// All methods default to no-ops so observers implement only what they
/// care about. [`NullObserver`] is the ready-made silent one.
pub trait MergeObserver {
    /// The first input's header was read; `version` governs the run.
    fn on_version(&mut self, version: u32) {
        let _ = version;
    }

    /// An input file is about to be read.
    fn on_file_start(&mut self, path: &Path) {
        let _ = path;
    }

    /// An input file finished streaming.
    fn on_file_done(&mut self, report: &FileReport) {
        let _ = report;
    }

    /// All inputs consumed; `total` unique entries are in the store.
    fn on_finalized(&mut self, total: usize) {
        let _ = total;
    }
}

/// An observer that ignores every event.
#[derive(Debug, Default)]
pub struct NullObserver;

impl MergeObserver for NullObserver {}
