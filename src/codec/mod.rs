//! Codec Module
//!
//! Turns keys and values into the strings that are measured, written to
//! partition files, and read back.
//!
//! ## Responsibilities
//! - Primitive string encoding (raw UTF-8, no quoting)
//! - Structural encoding for everything else (JSON via serde_json)
//! - Big-endian integer helpers shared by the partition file format
//!
//! Codecs are handed to a storage explicitly at construction and shared by
//! every partition it creates, so a partition can decode its file without
//! knowing anything about `K` or `T` beyond the codec it was given.

mod encoding;
mod json;

use std::borrow::Cow;

use crate::error::Result;

pub use encoding::{bytes_to_string, decode_u32, encode_u32, len_to_u32, utf8_len, INT_SIZE};
pub use json::JsonCodec;

/// Encoder/decoder pair for one key or value type
pub trait Codec<T>: Send + Sync {
    /// Encode a value to its string form
    fn encode<'a>(&self, value: &'a T) -> Result<Cow<'a, str>>;

    /// Decode a value from its string form
    fn decode(&self, text: String) -> Result<T>;

    /// Whether `value` is the "no key" sentinel (e.g. JSON `null`)
    fn is_absent(&self, _value: &T) -> bool {
        false
    }
}

/// Codec for the primitive string type: the string is its own encoding
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec;

impl Codec<String> for Utf8Codec {
    fn encode<'a>(&self, value: &'a String) -> Result<Cow<'a, str>> {
        Ok(Cow::Borrowed(value.as_str()))
    }

    fn decode(&self, text: String) -> Result<String> {
        Ok(text)
    }
}
