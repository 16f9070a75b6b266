//! Key Module
//!
//! Validation and percent-encoding of keys.
//!
//! ## Responsibilities
//! - Reject keys that could escape the store root
//! - Percent-decode keys that arrived encoded (URL paths)
//! - Percent-encode keys for listings on request
//! - Parse the single `key=value` pair of a path-form set
//! - Parse urlencoded form bodies byte-for-byte

mod codec;
mod pair;

pub use codec::{decode, encode, normalize};
pub use pair::{parse_form, parse_path_pair, KeyValuePair};
