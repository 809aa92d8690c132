//! Byte-level helpers
//!
//! UTF-8 length and 4-byte big-endian integer conversion used by the
//! partition file format.

use crate::error::{Result, SpillError};

/// Width of every integer field in a partition file
pub const INT_SIZE: usize = 4;

/// Number of bytes `value` occupies in UTF-8
pub fn utf8_len(value: &str) -> usize {
    value.len()
}

/// Encode an integer as 4 big-endian bytes
pub fn encode_u32(value: u32) -> [u8; INT_SIZE] {
    value.to_be_bytes()
}

/// Decode 4 big-endian bytes. Returns `None` if fewer than 4 bytes are given.
pub fn decode_u32(bytes: &[u8]) -> Option<u32> {
    let head: [u8; INT_SIZE] = bytes.get(..INT_SIZE)?.try_into().ok()?;
    Some(u32::from_be_bytes(head))
}

/// Convert a length to the 4-byte field type, failing if it does not fit
pub fn len_to_u32(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        SpillError::Serialization(format!("length {} does not fit in a 4-byte field", len))
    })
}

/// Interpret bytes read from a partition file as UTF-8
pub fn bytes_to_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| SpillError::Serialization(format!("invalid UTF-8 in partition file: {}", e)))
}
