//! Merged cache serialization.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use pscache_codec::{write_header, CacheEntry, CacheHeader};

use crate::error::MergeError;

/// Writes a cache file: header once, then each entry in the given order.
///
/// Uses the codec's append-only primitives through a buffered writer —
/// no seeking, so the output streams. All-or-nothing from the caller's
/// perspective: on any I/O failure mid-write the partial file is removed
/// (best effort) before the error propagates, so a corrupt cache is
/// never left at the target path. The entry count is implicit in the
/// file length; the format stores no separate count field.
pub fn write_cache(
    path: &Path,
    header: &CacheHeader,
    entries: &[CacheEntry],
) -> Result<(), MergeError> {
    write_streaming(path, header, entries).map_err(|source| {
        let _ = std::fs::remove_file(path);
        MergeError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn write_streaming(
    path: &Path,
    header: &CacheHeader,
    entries: &[CacheEntry],
) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_header(&mut writer, header).map_err(io_of)?;
    for entry in entries {
        entry.encode(&mut writer).map_err(io_of)?;
    }
    writer.flush()
}

/// The codec's write primitives only fail on I/O; unwrap that here so
/// the writer deals in one error kind.
fn io_of(err: pscache_codec::FormatError) -> std::io::Error {
    match err {
        pscache_codec::FormatError::Io(e) => e,
        other => std::io::Error::new(std::io::ErrorKind::InvalidData, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pscache_codec::{read_header, EntryRecords, CURRENT_VERSION, HEADER_SIZE};
    use pscache_common::Key;
    use std::io::BufReader;

    fn entry(seed: u8) -> CacheEntry {
        CacheEntry::new(Key::from_bytes(&[seed; 20]), vec![seed; 8])
    }

    #[test]
    fn writes_header_and_ordered_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pscache");
        let entries = vec![entry(2), entry(1), entry(3)];
        let header = CacheHeader::new(CURRENT_VERSION, 44);

        write_cache(&path, &header, &entries).unwrap();

        let file = File::open(&path).unwrap();
        let mut reader = BufReader::new(file);
        let back = read_header(&mut reader).unwrap();
        assert_eq!(back, header);

        let read_entries: Vec<CacheEntry> = EntryRecords::new(reader, &back)
            .map(|raw| CacheEntry::decode(&raw.unwrap(), &back).unwrap())
            .collect();
        assert_eq!(read_entries, entries);
    }

    #[test]
    fn file_length_is_header_plus_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pscache");
        let entries = vec![entry(1), entry(2)];

        write_cache(&path, &CacheHeader::new(CURRENT_VERSION, 44), &entries).unwrap();

        let len = std::fs::metadata(&path).unwrap().len() as usize;
        assert_eq!(len, HEADER_SIZE + 2 * 44);
    }

    #[test]
    fn empty_entry_list_yields_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pscache");

        write_cache(&path, &CacheHeader::new(CURRENT_VERSION, 44), &[]).unwrap();

        let len = std::fs::metadata(&path).unwrap().len() as usize;
        assert_eq!(len, HEADER_SIZE);
    }

    #[test]
    fn unwritable_path_errors_and_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.pscache");

        let err = write_cache(&path, &CacheHeader::new(CURRENT_VERSION, 44), &[]).unwrap_err();
        assert!(matches!(err, MergeError::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn rewrite_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.pscache");
        let b = dir.path().join("b.pscache");
        let entries = vec![entry(9), entry(4)];
        let header = CacheHeader::new(CURRENT_VERSION, 44);

        write_cache(&a, &header, &entries).unwrap();
        write_cache(&b, &header, &entries).unwrap();

        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }
}
