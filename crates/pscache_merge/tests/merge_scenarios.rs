//! End-to-end merge behavior over real files on disk.

use std::path::{Path, PathBuf};

use pscache_codec::{read_header, CacheEntry, CacheHeader, EntryRecords, CURRENT_VERSION};
use pscache_common::Key;
use pscache_merge::{merge_to_file, write_cache, MergeError, NullObserver};

fn entry(seed: u8) -> CacheEntry {
    CacheEntry::new(Key::from_bytes(&[seed; 20]), vec![seed.wrapping_mul(7); 32])
}

fn entry_size() -> u32 {
    entry(0).encoded_size() as u32
}

fn cache_file(dir: &Path, name: &str, entries: &[CacheEntry]) -> PathBuf {
    let path = dir.join(name);
    let header = CacheHeader::new(CURRENT_VERSION, entry_size());
    write_cache(&path, &header, entries).unwrap();
    path
}

fn read_entries(path: &Path) -> Vec<CacheEntry> {
    let file = std::fs::File::open(path).unwrap();
    let mut reader = std::io::BufReader::new(file);
    let header = read_header(&mut reader).unwrap();
    EntryRecords::new(reader, &header)
        .map(|raw| CacheEntry::decode(&raw.unwrap(), &header).unwrap())
        .collect()
}

#[test]
fn merging_a_file_with_itself_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = cache_file(dir.path(), "a.pscache", &[entry(1), entry(2), entry(3)]);
    let output = dir.path().join("merged.pscache");

    let inputs = vec![input.clone(), input.clone()];
    let report = merge_to_file(&inputs, &output, &mut NullObserver).unwrap();

    assert_eq!(report.total_entries, 3);
    assert_eq!(report.files[0].new_count, 3);
    assert_eq!(report.files[1].new_count, 0);
    assert_eq!(report.files[1].duplicate_count, 3);
    assert_eq!(read_entries(&output), read_entries(&input));
}

#[test]
fn union_of_disjoint_key_sets() {
    let dir = tempfile::tempdir().unwrap();
    let a = cache_file(dir.path(), "a.pscache", &[entry(1), entry(2)]);
    let b = cache_file(dir.path(), "b.pscache", &[entry(3), entry(4), entry(5)]);
    let output = dir.path().join("merged.pscache");

    let report = merge_to_file(&[a, b], &output, &mut NullObserver).unwrap();

    assert_eq!(report.total_entries, 5);
    assert_eq!(report.files[0].new_count, 2);
    assert_eq!(report.files[1].new_count, 3);
}

#[test]
fn union_of_overlapping_key_sets() {
    let dir = tempfile::tempdir().unwrap();
    // a = 3 entries, b = 4 entries, 2 keys shared: expect 3 + 4 - 2.
    let a = cache_file(dir.path(), "a.pscache", &[entry(1), entry(2), entry(3)]);
    let b = cache_file(
        dir.path(),
        "b.pscache",
        &[entry(2), entry(3), entry(4), entry(5)],
    );
    let output = dir.path().join("merged.pscache");

    let report = merge_to_file(&[a, b], &output, &mut NullObserver).unwrap();

    assert_eq!(report.total_entries, 5);
    assert_eq!(report.files[1].new_count, 2);
    assert_eq!(report.files[1].duplicate_count, 2);
}

#[test]
fn merge_order_changes_layout_not_key_set() {
    let dir = tempfile::tempdir().unwrap();
    let a = cache_file(dir.path(), "a.pscache", &[entry(1), entry(2)]);
    let b = cache_file(dir.path(), "b.pscache", &[entry(2), entry(3)]);
    let ab = dir.path().join("ab.pscache");
    let ba = dir.path().join("ba.pscache");

    merge_to_file(&[a.clone(), b.clone()], &ab, &mut NullObserver).unwrap();
    merge_to_file(&[b, a], &ba, &mut NullObserver).unwrap();

    let keys = |path: &Path| {
        let mut keys: Vec<String> = read_entries(path)
            .iter()
            .map(|e| e.key.to_string())
            .collect();
        keys.sort();
        keys
    };
    assert_eq!(keys(&ab), keys(&ba));
}

#[test]
fn rerunning_the_same_merge_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let a = cache_file(dir.path(), "a.pscache", &[entry(9), entry(1)]);
    let b = cache_file(dir.path(), "b.pscache", &[entry(1), entry(4)]);
    let first = dir.path().join("first.pscache");
    let second = dir.path().join("second.pscache");

    let inputs = vec![a, b];
    merge_to_file(&inputs, &first, &mut NullObserver).unwrap();
    merge_to_file(&inputs, &second, &mut NullObserver).unwrap();

    assert_eq!(
        std::fs::read(&first).unwrap(),
        std::fs::read(&second).unwrap()
    );
}

#[test]
fn mixed_versions_fail_and_produce_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let a = cache_file(dir.path(), "a.pscache", &[entry(1)]);
    let b = {
        let e = CacheEntry::new(Key::from_bytes(&[2; 16]), vec![2; 32]);
        let path = dir.path().join("b.pscache");
        write_cache(&path, &CacheHeader::new(4, e.encoded_size() as u32), &[e]).unwrap();
        path
    };
    let output = dir.path().join("merged.pscache");

    let err = merge_to_file(&[a, b], &output, &mut NullObserver).unwrap_err();

    assert!(matches!(err, MergeError::VersionMismatch { .. }));
    assert!(!output.exists());
}

#[test]
fn flipped_checksum_drops_only_that_entry() {
    let dir = tempfile::tempdir().unwrap();
    let victim = cache_file(
        dir.path(),
        "victim.pscache",
        &[entry(1), entry(2), entry(3)],
    );

    // Corrupt the stored checksum of the middle record.
    let record = entry_size() as usize;
    let checksum_offset = 12 + record + record - 1;
    let mut bytes = std::fs::read(&victim).unwrap();
    bytes[checksum_offset] ^= 0xFF;
    std::fs::write(&victim, &bytes).unwrap();

    let output = dir.path().join("merged.pscache");
    let report = merge_to_file(&[victim], &output, &mut NullObserver).unwrap();

    assert_eq!(report.total_entries, 2);
    assert_eq!(report.files[0].corrupt_count, 1);

    let keys: Vec<String> = read_entries(&output)
        .iter()
        .map(|e| e.key.to_string())
        .collect();
    assert!(keys.contains(&entry(1).key.to_string()));
    assert!(!keys.contains(&entry(2).key.to_string()));
    assert!(keys.contains(&entry(3).key.to_string()));
}

#[test]
fn written_output_reads_back_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let a = cache_file(dir.path(), "a.pscache", &[entry(5), entry(6)]);
    let b = cache_file(dir.path(), "b.pscache", &[entry(6), entry(7)]);
    let output = dir.path().join("merged.pscache");

    merge_to_file(&[a, b], &output, &mut NullObserver).unwrap();

    let expected = vec![entry(5), entry(6), entry(7)];
    let actual = read_entries(&output);
    assert_eq!(actual, expected);
    for (read, built) in actual.iter().zip(&expected) {
        assert_eq!(read.key, built.key);
        assert_eq!(read.payload, built.payload);
        assert_eq!(read.checksum, built.checksum);
    }
}

#[test]
fn shared_key_counts_once_and_order_follows_first_appearance() {
    let dir = tempfile::tempdir().unwrap();
    let x = cache_file(dir.path(), "x.pscache", &[entry(1), entry(2), entry(3)]);
    let y = cache_file(dir.path(), "y.pscache", &[entry(3), entry(4)]);
    let output = dir.path().join("merged.pscache");

    let report = merge_to_file(&[x, y], &output, &mut NullObserver).unwrap();

    assert_eq!(report.files[0].new_count, 3);
    assert_eq!(report.files[1].new_count, 1);
    assert_eq!(report.total_entries, 4);

    let order: Vec<Key> = read_entries(&output).iter().map(|e| e.key.clone()).collect();
    assert_eq!(
        order,
        vec![entry(1).key, entry(2).key, entry(3).key, entry(4).key]
    );
}

#[test]
fn all_empty_inputs_produce_header_only_output() {
    let dir = tempfile::tempdir().unwrap();
    let a = cache_file(dir.path(), "a.pscache", &[]);
    let b = cache_file(dir.path(), "b.pscache", &[]);
    let output = dir.path().join("merged.pscache");

    let report = merge_to_file(&[a, b], &output, &mut NullObserver).unwrap();

    assert_eq!(report.total_entries, 0);
    assert_eq!(std::fs::metadata(&output).unwrap().len(), 12);
    assert!(read_entries(&output).is_empty());
}
