//! Cache file header parsing and serialization.

use std::io::{Read, Write};

use crate::error::FormatError;
use crate::layout::{layout_for, EntryLayout};

/// Magic bytes identifying a pipeline state cache file.
pub const MAGIC: [u8; 4] = *b"PSCC";

/// On-disk header size in bytes: magic + version + entry size.
pub const HEADER_SIZE: usize = 12;

/// The parsed header of one cache file.
///
/// Parsed once per input file at open time, constructed once for the
/// output file at write time. The version and entry size together fix
/// the layout of every record in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheHeader {
    /// Format version; selects the record layout.
    pub version: u32,
    /// Size in bytes of every record in the body.
    pub entry_size: u32,
}

impl CacheHeader {
    /// Creates a header for the given version and record size.
    pub fn new(version: u32, entry_size: u32) -> Self {
        Self {
            version,
            entry_size,
        }
    }

    /// Returns the record layout this header's version prescribes.
    ///
    /// Headers that came through [`read_header`] always have one; the
    /// `None` arm only fires for hand-built headers with a bogus version.
    pub fn layout(&self) -> Option<EntryLayout> {
        layout_for(self.version)
    }
}

/// Reads and validates a cache file header.
///
/// Consumes exactly [`HEADER_SIZE`] bytes on success. Validates the magic
/// bytes, that the version is known, and that the entry size can hold the
/// version's key and checksum. Fails without reading past the header
/// region.
pub fn read_header<R: Read>(reader: &mut R) -> Result<CacheHeader, FormatError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(FormatError::BadMagic { found: magic });
    }

    let version = read_u32(reader)?;
    let layout = layout_for(version).ok_or(FormatError::UnsupportedVersion { version })?;

    let entry_size = read_u32(reader)?;
    if (entry_size as usize) < layout.min_entry_size() {
        return Err(FormatError::BadEntrySize {
            version,
            entry_size,
        });
    }

    Ok(CacheHeader {
        version,
        entry_size,
    })
}

/// Serializes a header: magic, version, entry size, all append-only.
pub fn write_header<W: Write>(writer: &mut W, header: &CacheHeader) -> Result<(), FormatError> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&header.version.to_le_bytes())?;
    writer.write_all(&header.entry_size.to_le_bytes())?;
    Ok(())
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32, FormatError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}
