//! Binary codec for pipeline-state cache files.
//!
//! A cache file is a 12-byte header (magic, version, entry size) followed
//! by a contiguous sequence of fixed-size records. This crate knows how to
//! read and write exactly one file at a time: header parsing and
//! validation, a streaming record reader, the pure record decode into
//! key/payload/checksum, and the append-only write primitives. It has no
//! notion of other files — cross-file rules live in `pscache_merge`.

#![warn(missing_docs)]

pub mod entry;
pub mod error;
pub mod header;
pub mod layout;
pub mod reader;

pub use entry::CacheEntry;
pub use error::FormatError;
pub use header::{read_header, write_header, CacheHeader, HEADER_SIZE, MAGIC};
pub use layout::{layout_for, EntryLayout, CURRENT_VERSION};
pub use reader::EntryRecords;
