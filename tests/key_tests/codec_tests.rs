//! Key Codec Tests
//!
//! Tests verify:
//! - Validation of unsafe keys
//! - Percent-decoding of encoded keys
//! - Percent-encoding for listings
//! - Path-form `key=value` parsing
//! - Form body parsing

use flatkv::key::{self, KeyValuePair};
use flatkv::FlatError;

// =============================================================================
// Normalize Tests
// =============================================================================

#[test]
fn test_normalize_accepts_plain_key() {
    assert_eq!(key::normalize("foo").unwrap(), "foo");
    assert_eq!(key::normalize("with space").unwrap(), "with space");
    assert_eq!(key::normalize("a..b").unwrap(), "a..b");
}

#[test]
fn test_normalize_accepts_dot_prefixed_key() {
    // Hidden from listings, but writable
    assert_eq!(key::normalize(".hidden").unwrap(), ".hidden");
}

#[test]
fn test_normalize_rejects_empty_key() {
    let err = key::normalize("").unwrap_err();
    assert!(matches!(err, FlatError::InvalidKey { .. }));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_normalize_rejects_traversal_segments() {
    for raw in [".", "..", "../etc", "a/b", "a\\b", "/abs", "nul\0byte"] {
        let err = key::normalize(raw).unwrap_err();
        assert!(
            matches!(err, FlatError::InvalidKey { .. }),
            "expected {:?} to be rejected",
            raw
        );
    }
}

// =============================================================================
// Decode / Encode Tests
// =============================================================================

#[test]
fn test_decode_percent_encoded_key() {
    assert_eq!(key::decode("hello%20world"), "hello world");
    assert_eq!(key::decode("caf%C3%A9"), "café");
    assert_eq!(key::decode("plain"), "plain");
}

#[test]
fn test_decode_then_normalize_catches_encoded_separator() {
    let decoded = key::decode("..%2Fsecret");
    assert!(key::normalize(&decoded).is_err());
}

#[test]
fn test_encode_escapes_reserved_characters() {
    assert_eq!(key::encode("hello world"), "hello%20world");
    assert_eq!(key::encode("a&b=c"), "a%26b%3Dc");
    assert_eq!(key::encode("café"), "caf%C3%A9");
}

#[test]
fn test_encode_keeps_unreserved_characters() {
    assert_eq!(key::encode("Az09-_.!~*'()"), "Az09-_.!~*'()");
}

// =============================================================================
// Path Pair Tests
// =============================================================================

#[test]
fn test_parse_path_pair() {
    let pair = key::parse_path_pair("/foo=bar").unwrap();
    assert_eq!(
        pair,
        KeyValuePair {
            key: "foo".to_string(),
            value: b"bar".to_vec(),
        }
    );
}

#[test]
fn test_parse_path_pair_splits_on_first_equals() {
    let pair = key::parse_path_pair("/a=b=c").unwrap();
    assert_eq!(pair.key, "a");
    assert_eq!(pair.value, b"b=c");
}

#[test]
fn test_parse_path_pair_empty_value() {
    let pair = key::parse_path_pair("/foo=").unwrap();
    assert_eq!(pair.key, "foo");
    assert!(pair.value.is_empty());
}

#[test]
fn test_parse_path_pair_decodes_both_halves() {
    let pair = key::parse_path_pair("/my%20key=a%3Db").unwrap();
    assert_eq!(pair.key, "my key");
    assert_eq!(pair.value, b"a=b");
}

#[test]
fn test_parse_path_pair_without_equals() {
    let err = key::parse_path_pair("/foobar").unwrap_err();
    assert!(matches!(err, FlatError::MalformedPair { ref input } if input == "foobar"));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn test_parse_path_pair_rejects_empty_key() {
    let err = key::parse_path_pair("/=bar").unwrap_err();
    assert!(matches!(err, FlatError::InvalidKey { .. }));
}

#[test]
fn test_parse_path_pair_rejects_nested_path() {
    let err = key::parse_path_pair("/dir/foo=bar").unwrap_err();
    assert!(matches!(err, FlatError::InvalidKey { .. }));
}

#[test]
fn test_parse_path_pair_keeps_non_utf8_value_bytes() {
    let pair = key::parse_path_pair("/bin=%FF%FE").unwrap();
    assert_eq!(pair.key, "bin");
    assert_eq!(pair.value, vec![0xFF, 0xFE]);
}

// =============================================================================
// Form Body Tests
// =============================================================================

#[test]
fn test_parse_form_pairs() {
    let pairs = key::parse_form(b"foo=bar&spam=eggs");
    assert_eq!(
        pairs,
        vec![
            ("foo".to_string(), b"bar".to_vec()),
            ("spam".to_string(), b"eggs".to_vec()),
        ]
    );
}

#[test]
fn test_parse_form_decodes_plus_and_escapes() {
    let pairs = key::parse_form(b"my+key=a%26b+c");
    assert_eq!(pairs, vec![("my key".to_string(), b"a&b c".to_vec())]);
}

#[test]
fn test_parse_form_keeps_non_utf8_value_bytes() {
    let pairs = key::parse_form(b"form=%FF&other=%C3%28");
    assert_eq!(pairs[0].1, vec![0xFF]);
    assert_eq!(pairs[1].1, vec![0xC3, 0x28]);
}

#[test]
fn test_parse_form_splits_on_first_equals() {
    let pairs = key::parse_form(b"a=b=c");
    assert_eq!(pairs, vec![("a".to_string(), b"b=c".to_vec())]);
}

#[test]
fn test_parse_form_segment_without_equals_is_empty_value() {
    let pairs = key::parse_form(b"flag&x=1");
    assert_eq!(pairs[0], ("flag".to_string(), Vec::new()));
    assert_eq!(pairs[1], ("x".to_string(), b"1".to_vec()));
}

#[test]
fn test_parse_form_skips_empty_segments() {
    assert!(key::parse_form(b"").is_empty());
    assert!(key::parse_form(b"&&").is_empty());
    assert_eq!(key::parse_form(b"&a=1&").len(), 1);
}
