//! Multi-file merge engine for pipeline-state caches.
//!
//! Combines several cache files into one containing the union of unique
//! entries. Files are processed strictly in caller order; entries
//! deduplicate by key with first-seen-wins semantics, and the output
//! preserves first-appearance order, so reruns over the same inputs are
//! byte-identical. All inputs must share one cache version — the engine
//! refuses to mix layouts.
//!
//! The usual call is [`merge_to_file`]; finer-grained control is
//! available through [`MergeEngine`] directly.

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod report;
pub mod store;
pub mod writer;

pub use engine::{MergeEngine, MergedCache};
pub use error::MergeError;
pub use report::{FileReport, MergeObserver, MergeReport, NullObserver};
pub use store::DedupStore;
pub use writer::write_cache;

use std::path::{Path, PathBuf};

/// Merges the given cache files and writes the result to `output`.
///
/// The one-call form of the whole pipeline: ingest every input in order,
/// then serialize the deduplicated result. On failure no output file is
/// left at the target path (failures during writing remove the partial
/// file). Returns the run's [`MergeReport`].
pub fn merge_to_file(
    inputs: &[PathBuf],
    output: &Path,
    observer: &mut dyn MergeObserver,
) -> Result<MergeReport, MergeError> {
    let (merged, report) = MergeEngine::new().merge(inputs, observer)?;
    write_cache(output, &merged.header, &merged.entries)?;
    Ok(report)
}
