//! Structural (JSON) codec

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SpillError};

use super::Codec;

/// Codec that stores a value as its serde_json representation
pub struct JsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonCodec<{}>", std::any::type_name::<T>())
    }
}

impl<T> Codec<T> for JsonCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn encode<'a>(&self, value: &'a T) -> Result<Cow<'a, str>> {
        serde_json::to_string(value)
            .map(Cow::Owned)
            .map_err(|e| SpillError::Serialization(format!("JSON encode failed: {}", e)))
    }

    fn decode(&self, text: String) -> Result<T> {
        serde_json::from_str(&text)
            .map_err(|e| SpillError::Serialization(format!("JSON decode failed: {}", e)))
    }

    /// A value that serializes to JSON `null` counts as absent
    fn is_absent(&self, value: &T) -> bool {
        serde_json::to_string(value).map_or(false, |text| text == "null")
    }
}
