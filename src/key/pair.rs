//! Pair parsing
//!
//! `POST /foo=bar` carries exactly one pair in the request path, `POST /`
//! carries any number in a urlencoded form body. Keys are decoded to text,
//! values to raw bytes so no escape sequence is ever rewritten.

use percent_encoding::percent_decode;

use crate::error::{FlatError, Result};

use super::codec::{decode, normalize};

/// A single validated key/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValuePair {
    pub key: String,
    pub value: Vec<u8>,
}

/// Parse the raw (still percent-encoded) request path into one pair.
///
/// The leading `/` is stripped, the remainder is split on the FIRST `=`,
/// and both halves are percent-decoded. `/a=b=c` yields `a` -> `b=c`.
pub fn parse_path_pair(raw_path: &str) -> Result<KeyValuePair> {
    let segment = raw_path.strip_prefix('/').unwrap_or(raw_path);

    let (raw_key, raw_value) = segment
        .split_once('=')
        .ok_or_else(|| FlatError::MalformedPair {
            input: segment.to_string(),
        })?;

    let key = normalize(&decode(raw_key))?;
    let value = percent_decode(raw_value.as_bytes()).collect();

    Ok(KeyValuePair { key, value })
}

/// Parse an `application/x-www-form-urlencoded` body.
///
/// Pairs are separated by `&` and split on the first `=`; a segment without
/// `=` is a key with an empty value. `+` stands for a space in both halves.
/// Keys are not validated here: an unsafe key fails its own write.
pub fn parse_form(body: &[u8]) -> Vec<(String, Vec<u8>)> {
    body.split(|&b| b == b'&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (raw_key, raw_value) = match segment.iter().position(|&b| b == b'=') {
                Some(at) => (&segment[..at], &segment[at + 1..]),
                None => (segment, &[][..]),
            };
            let key = String::from_utf8_lossy(&form_decode(raw_key)).into_owned();
            (key, form_decode(raw_value))
        })
        .collect()
}

fn form_decode(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}
