//! The merge engine: folds input files into the deduplicated store.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use pscache_codec::{read_header, CacheEntry, CacheHeader, EntryRecords, FormatError};

use crate::error::MergeError;
use crate::report::{FileReport, MergeObserver, MergeReport};
use crate::store::DedupStore;

/// Merges pipeline-state cache files into one deduplicated entry set.
///
/// One engine instance serves one run: ingest each input path in caller
/// order with [`ingest`](MergeEngine::ingest) (or use
/// [`merge`](MergeEngine::merge) for the whole loop), then take the
/// result with [`finish`](MergeEngine::finish). The expected header is a
/// field on the instance — established by the first file, enforced
/// against every later one — so engines stay reentrant and testable.
///
/// Processing is strictly sequential: per-file new-entry counts depend
/// on which keys earlier files already contributed, so the same inputs
/// in the same order always produce the same counts and the same output.
#[derive(Debug, Default)]
pub struct MergeEngine {
    expected: Option<CacheHeader>,
    store: DedupStore,
}

/// A finished merge: the output header and the entries to write, in
/// first-appearance order.
#[derive(Debug)]
pub struct MergedCache {
    /// Header for the output file (the inputs' shared version and size).
    pub header: CacheHeader,
    /// Unique entries in first-appearance order.
    pub entries: Vec<CacheEntry>,
}

impl MergeEngine {
    /// Creates an engine with an empty store and no expected version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a whole merge: every path in order, then finalization.
    ///
    /// This is the main entry point. Fatal errors (unreadable file, bad
    /// header, version mismatch) abort immediately; per-entry corruption
    /// and truncated tails are absorbed into the file reports.
    pub fn merge(
        mut self,
        inputs: &[PathBuf],
        observer: &mut dyn MergeObserver,
    ) -> Result<(MergedCache, MergeReport), MergeError> {
        if inputs.is_empty() {
            return Err(MergeError::NoInputs);
        }

        let mut files = Vec::with_capacity(inputs.len());
        for path in inputs {
            observer.on_file_start(path);
            let report = self.ingest(path, observer)?;
            observer.on_file_done(&report);
            files.push(report);
        }

        let total = self.store.len();
        observer.on_finalized(total);

        // expected is always set here: inputs was non-empty and every
        // ingest either set it or failed the run.
        let header = self.expected.ok_or(MergeError::NoInputs)?;
        let report = MergeReport {
            version: header.version,
            files,
            total_entries: total,
        };
        Ok((
            MergedCache {
                header,
                entries: self.store.into_entries(),
            },
            report,
        ))
    }

    /// Ingests one input file into the store.
    ///
    /// Reads and validates the header, gates it against the run's
    /// expected header, then streams records: each is decoded, checksum
    /// checked, and offered to the store. Corrupt records are counted
    /// and skipped; a truncated final record stops this file but keeps
    /// everything accepted so far.
    pub fn ingest(
        &mut self,
        path: &Path,
        observer: &mut dyn MergeObserver,
    ) -> Result<FileReport, MergeError> {
        let file = File::open(path).map_err(|e| MergeError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut reader = BufReader::new(file);

        let header = read_header(&mut reader).map_err(|e| MergeError::Format {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.check_header(path, &header, observer)?;

        let mut report = FileReport {
            path: path.to_path_buf(),
            new_count: 0,
            duplicate_count: 0,
            corrupt_count: 0,
            truncated: false,
        };

        for record in EntryRecords::new(reader, &header) {
            let raw = match record {
                Ok(raw) => raw,
                Err(FormatError::TruncatedEntry { .. }) => {
                    report.truncated = true;
                    break;
                }
                Err(FormatError::Io(e)) => {
                    return Err(MergeError::Open {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
                Err(e) => {
                    return Err(MergeError::Format {
                        path: path.to_path_buf(),
                        source: e,
                    });
                }
            };

            let entry = CacheEntry::decode(&raw, &header).map_err(|e| MergeError::Format {
                path: path.to_path_buf(),
                source: e,
            })?;

            if !entry.is_valid() {
                report.corrupt_count += 1;
                continue;
            }

            if self.store.insert(entry) {
                report.new_count += 1;
            } else {
                report.duplicate_count += 1;
            }
        }

        Ok(report)
    }

    /// Finishes an incrementally driven run, yielding the merged result.
    ///
    /// Errors with [`MergeError::NoInputs`] if no file was ever ingested.
    pub fn finish(self) -> Result<MergedCache, MergeError> {
        let header = self.expected.ok_or(MergeError::NoInputs)?;
        Ok(MergedCache {
            header,
            entries: self.store.into_entries(),
        })
    }

    /// Unique entries accumulated so far.
    pub fn entry_count(&self) -> usize {
        self.store.len()
    }

    /// The run's version gate.
    ///
    /// The first header establishes the expectation and fires the
    /// version event; later headers must match it exactly in both
    /// version and entry size.
    fn check_header(
        &mut self,
        path: &Path,
        header: &CacheHeader,
        observer: &mut dyn MergeObserver,
    ) -> Result<(), MergeError> {
        match self.expected {
            None => {
                self.expected = Some(*header);
                observer.on_version(header.version);
                Ok(())
            }
            Some(expected) if header.version != expected.version => {
                Err(MergeError::VersionMismatch {
                    path: path.to_path_buf(),
                    expected: expected.version,
                    found: header.version,
                })
            }
            Some(expected) if header.entry_size != expected.entry_size => {
                Err(MergeError::EntrySizeMismatch {
                    path: path.to_path_buf(),
                    expected: expected.entry_size,
                    found: header.entry_size,
                })
            }
            Some(_) => Ok(()),
        }
    }
}
