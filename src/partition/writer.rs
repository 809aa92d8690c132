//! Partition Writer
//!
//! Serializes encoded entries into the partition file layout.

use std::io::Write;

use bytes::{BufMut, BytesMut};

use crate::codec::{len_to_u32, INT_SIZE};
use crate::error::Result;

/// Write `entries` in partition layout and return the number of bytes written
///
/// The header block (count, then `[key_len][val_len][key]` per entry) is
/// assembled in memory and written in one call; values follow in the same
/// order. An empty slice produces only the 4-byte count.
pub fn write_entries<W, K, V>(out: &mut W, entries: &[(K, V)]) -> Result<u64>
where
    W: Write + ?Sized,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let header_len: usize = entries
        .iter()
        .map(|(key, _)| 2 * INT_SIZE + key.as_ref().len())
        .sum();

    let mut header = BytesMut::with_capacity(INT_SIZE + header_len);
    header.put_u32(len_to_u32(entries.len())?);

    for (key, value) in entries {
        let key = key.as_ref().as_bytes();
        header.put_u32(len_to_u32(key.len())?);
        header.put_u32(len_to_u32(value.as_ref().len())?);
        header.put_slice(key);
    }

    out.write_all(&header)?;
    let mut written = header.len() as u64;

    for (_, value) in entries {
        let value = value.as_ref().as_bytes();
        out.write_all(value)?;
        written += value.len() as u64;
    }

    out.flush()?;

    Ok(written)
}
