//! Streaming record reader.

use std::io::{ErrorKind, Read};

use crate::error::FormatError;
use crate::header::CacheHeader;

/// An iterator over the raw fixed-size records of one cache file body.
///
/// Yields one `entry_size`-byte record at a time, so peak read memory is
/// bounded by a single record regardless of file size. The iterator is
/// finite and not restartable: it consumes the underlying reader.
///
/// Termination rules:
/// - end of stream on a record boundary ends the sequence cleanly;
/// - a partial final record yields [`FormatError::TruncatedEntry`];
/// - an I/O error yields [`FormatError::Io`].
///
/// After any error the iterator fuses — the unread tail of a damaged
/// file is never interpreted as more records.
pub struct EntryRecords<R: Read> {
    reader: R,
    entry_size: usize,
    done: bool,
}

impl<R: Read> EntryRecords<R> {
    /// Creates a record iterator over a reader positioned just past the
    /// header, using the header's entry size.
    pub fn new(reader: R, header: &CacheHeader) -> Self {
        Self {
            reader,
            entry_size: header.entry_size as usize,
            done: false,
        }
    }

    /// Fills `buf` completely, or reports how far the stream got.
    ///
    /// Returns `Ok(0)` on clean EOF before the first byte, `Ok(n)` with
    /// `n == buf.len()` for a full record, and `Ok(n)` with a short `n`
    /// when the stream ended mid-record. `read_exact` cannot be used
    /// here because it loses the clean-EOF/partial-record distinction.
    fn fill_record(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for EntryRecords<R> {
    type Item = Result<Vec<u8>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = vec![0u8; self.entry_size];
        match self.fill_record(&mut buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) if n == self.entry_size => Some(Ok(buf)),
            Ok(n) => {
                self.done = true;
                Some(Err(FormatError::TruncatedEntry {
                    expected: self.entry_size,
                    actual: n,
                }))
            }
            Err(e) => {
                self.done = true;
                Some(Err(FormatError::Io(e)))
            }
        }
    }
}
