//! Tests for codecs
//!
//! These tests verify:
//! - Primitive string encoding is the raw string
//! - Structural encoding is JSON for non-string types
//! - Absent-key detection
//! - Serialization errors on bad input

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spillkv::codec::{Codec, JsonCodec, Utf8Codec};
use spillkv::SpillError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Student {
    id: String,
    name: String,
    age: u32,
}

// =============================================================================
// Utf8Codec Tests
// =============================================================================

#[test]
fn test_utf8_codec_is_identity() {
    let value = "hello world".to_string();

    let encoded = Utf8Codec.encode(&value).unwrap();
    assert_eq!(encoded, "hello world");

    let decoded = Utf8Codec.decode(encoded.into_owned()).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn test_utf8_codec_does_not_quote() {
    let value = "quoted?".to_string();
    let encoded = Utf8Codec.encode(&value).unwrap();
    assert!(!encoded.starts_with('"'));
}

#[test]
fn test_utf8_codec_never_absent() {
    assert!(!Utf8Codec.is_absent(&String::new()));
    assert!(!Utf8Codec.is_absent(&"null".to_string()));
}

// =============================================================================
// JsonCodec Tests
// =============================================================================

#[test]
fn test_json_codec_struct() {
    let codec = JsonCodec::<Student>::new();
    let student = Student {
        id: "00001".to_string(),
        name: "Member 1".to_string(),
        age: 18,
    };

    let encoded = codec.encode(&student).unwrap();
    assert_eq!(encoded, r#"{"id":"00001","name":"Member 1","age":18}"#);

    let decoded = codec.decode(encoded.into_owned()).unwrap();
    assert_eq!(decoded, student);
}

#[test]
fn test_json_codec_quotes_strings() {
    let codec = JsonCodec::<String>::new();
    let binding = "abc".to_string();
    let encoded = codec.encode(&binding).unwrap();
    assert_eq!(encoded, "\"abc\"");
}

#[test]
fn test_json_codec_integer_key() {
    let codec = JsonCodec::<u64>::new();
    assert_eq!(codec.encode(&42).unwrap(), "42");
    assert_eq!(codec.decode("42".to_string()).unwrap(), 42);
}

#[test]
fn test_json_codec_map_value() {
    let codec = JsonCodec::<BTreeMap<String, Vec<i32>>>::new();
    let mut map = BTreeMap::new();
    map.insert("a".to_string(), vec![1, 2]);
    map.insert("b".to_string(), vec![]);

    let encoded = codec.encode(&map).unwrap().into_owned();
    assert_eq!(codec.decode(encoded).unwrap(), map);
}

#[test]
fn test_json_codec_decode_error() {
    let codec = JsonCodec::<Student>::new();
    let result = codec.decode("{not json".to_string());
    assert!(matches!(result, Err(SpillError::Serialization(_))));
}

#[test]
fn test_json_codec_encode_error() {
    // JSON object keys must be strings
    let codec = JsonCodec::<BTreeMap<Vec<u8>, u8>>::new();
    let mut map = BTreeMap::new();
    map.insert(vec![1u8], 1u8);

    let result = codec.encode(&map);
    assert!(matches!(result, Err(SpillError::Serialization(_))));
}

#[test]
fn test_json_codec_absent_sentinel() {
    let codec = JsonCodec::<Option<String>>::new();
    assert!(codec.is_absent(&None));
    assert!(!codec.is_absent(&Some("k".to_string())));

    let unit = JsonCodec::<()>::new();
    assert!(unit.is_absent(&()));
}

#[test]
fn test_json_codec_null_text_is_not_absent() {
    // Only the JSON literal null counts, not a string spelling it
    let codec = JsonCodec::<String>::new();
    assert!(!codec.is_absent(&"null".to_string()));
    assert!(!codec.is_absent(&String::new()));

    let numbers = JsonCodec::<Option<u32>>::new();
    assert!(!numbers.is_absent(&Some(0)));
    assert!(numbers.is_absent(&None));
}
