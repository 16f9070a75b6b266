//! Write report
//!
//! Outcome of a bulk `set`: every pair is attempted, failures are collected
//! instead of aborting the rest.

use crate::error::FlatError;

/// A single key that could not be written
#[derive(Debug)]
pub struct WriteFailure {
    pub key: String,
    pub error: FlatError,
}

/// Aggregate result of `Store::set`
#[derive(Debug, Default)]
pub struct WriteReport {
    written: Vec<String>,
    failures: Vec<WriteFailure>,
}

impl WriteReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_written(&mut self, key: impl Into<String>) {
        self.written.push(key.into());
    }

    pub(crate) fn record_failure(&mut self, key: impl Into<String>, error: FlatError) {
        self.failures.push(WriteFailure {
            key: key.into(),
            error,
        });
    }

    /// Keys written successfully, in input order
    pub fn written(&self) -> &[String] {
        &self.written
    }

    /// Keys that failed, in input order
    pub fn failures(&self) -> &[WriteFailure] {
        &self.failures
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether every failure is a key the client should not have sent
    pub fn only_invalid_keys(&self) -> bool {
        !self.failures.is_empty()
            && self
                .failures
                .iter()
                .all(|f| matches!(f.error, FlatError::InvalidKey { .. }))
    }

    /// Error of the last failed pair (in input order)
    pub fn last_error(&self) -> Option<&FlatError> {
        self.failures.last().map(|f| &f.error)
    }
}
