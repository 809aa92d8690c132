//! Partition Reader
//!
//! Parses the partition file layout back into raw key/value byte pairs.
//! A file that ends early yields every entry that was read completely and
//! silently drops the rest.

use std::io::{self, Read};

use crate::codec::{decode_u32, INT_SIZE};

use super::BUFFER_SIZE;

/// One entry as stored on disk, before decoding
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

/// Result of reading a partition file
#[derive(Debug, Default)]
pub struct ReadOutcome {
    /// Complete entries in file order
    pub entries: Vec<RawEntry>,

    /// Entry count declared in the file
    pub declared: u32,

    /// Declared entries that were missing or cut short
    pub dropped: usize,
}

/// Read every entry from a partition stream
///
/// Only genuine I/O failures are errors. Short reads (truncated or corrupt
/// files) end the affected section and the incomplete entries are omitted.
pub fn read_entries<R: Read + ?Sized>(input: &mut R) -> io::Result<ReadOutcome> {
    let count = read_up_to(input, INT_SIZE)?;
    let declared = match decode_u32(&count) {
        Some(n) => n,
        None => return Ok(ReadOutcome::default()),
    };

    // Header block: [key_len][val_len][key] per entry
    let mut headers: Vec<(Vec<u8>, usize)> = Vec::with_capacity((declared as usize).min(1024));
    for _ in 0..declared {
        let lens = read_up_to(input, 2 * INT_SIZE)?;
        let (key_len, value_len) = match (decode_u32(&lens), lens.get(INT_SIZE..).and_then(decode_u32)) {
            (Some(k), Some(v)) => (k as usize, v as usize),
            _ => break,
        };

        let key = read_up_to(input, key_len)?;
        if key.len() != key_len {
            break;
        }
        headers.push((key, value_len));
    }

    // Value block, same order as the header
    let mut entries = Vec::with_capacity(headers.len());
    for (key, value_len) in headers {
        let value = read_up_to(input, value_len)?;
        if value.len() == value_len {
            entries.push(RawEntry { key, value });
        }
    }

    let dropped = (declared as usize).saturating_sub(entries.len());

    Ok(ReadOutcome {
        entries,
        declared,
        dropped,
    })
}

/// Read at most `len` bytes; fewer are returned when the stream ends early
fn read_up_to<R: Read + ?Sized>(input: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(len.min(BUFFER_SIZE));
    match Read::take(&mut *input, len as u64).read_to_end(&mut buf) {
        Ok(_) => Ok(buf),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(buf),
        Err(e) => Err(e),
    }
}
