//! Error types for FlatKV
//!
//! Provides a unified error type for all operations, plus the mapping from
//! each failure kind to the HTTP status the request handlers answer with.

use std::io;

use thiserror::Error;

/// Result type alias using FlatError
pub type Result<T> = std::result::Result<T, FlatError>;

/// Unified error type for FlatKV operations
#[derive(Debug, Error)]
pub enum FlatError {
    // -------------------------------------------------------------------------
    // Key Errors
    // -------------------------------------------------------------------------
    #[error("invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("malformed pair {input:?}: expected key=value")]
    MalformedPair { input: String },

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("key not found: {key}")]
    NotFound { key: String },

    /// `context` names the key (or the listing) the operation was for, never
    /// the on-disk path.
    #[error("storage unavailable ({context}): {source}")]
    StorageUnavailable {
        context: String,
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    #[error("no data provided")]
    EmptyInput,

    // -------------------------------------------------------------------------
    // Configuration / Startup Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FlatError {
    /// Classify an I/O failure on `key`: a missing file becomes `NotFound`,
    /// everything else `StorageUnavailable`.
    pub fn from_io(key: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            FlatError::NotFound { key: key.to_string() }
        } else {
            FlatError::StorageUnavailable {
                context: key.to_string(),
                source: err,
            }
        }
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> u16 {
        match self {
            FlatError::InvalidKey { .. }
            | FlatError::MalformedPair { .. }
            | FlatError::EmptyInput => 400,
            FlatError::NotFound { .. } => 404,
            FlatError::StorageUnavailable { .. } | FlatError::Config(_) | FlatError::Io(_) => 500,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FlatError::NotFound { .. })
    }
}
