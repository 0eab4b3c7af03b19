//! Console progress rendering for merge runs.

use std::path::Path;

use pscache_merge::{FileReport, MergeObserver};

/// Turns engine events into human-readable progress lines on stderr.
///
/// stderr so that `--format json` output on stdout stays clean even if
/// someone combines the two.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    /// Creates a console observer.
    pub fn new() -> Self {
        Self
    }
}

impl MergeObserver for ConsoleObserver {
    fn on_version(&mut self, version: u32) {
        eprintln!("   Detected cache version {version}");
    }

    fn on_file_start(&mut self, path: &Path) {
        eprintln!("   Merging {}", path.display());
    }

    fn on_file_done(&mut self, report: &FileReport) {
        let mut line = format!("      {} new entries", report.new_count);
        if report.duplicate_count > 0 {
            line.push_str(&format!(", {} duplicates", report.duplicate_count));
        }
        if report.corrupt_count > 0 {
            line.push_str(&format!(", {} corrupt (skipped)", report.corrupt_count));
        }
        if report.truncated {
            line.push_str(", file truncated");
        }
        eprintln!("{line}");
    }

    fn on_finalized(&mut self, total: usize) {
        eprintln!("   Merged cache contains {total} unique entries");
    }
}
