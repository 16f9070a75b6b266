//! Configuration for FlatKV
//!
//! Centralized configuration with sensible defaults. A `Config` is handed to
//! the store and the server at construction time; nothing reads ambient
//! globals at call time.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::{FlatError, Result};

/// Main configuration for a FlatKV instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Store root. Every key is one regular file directly inside it:
    ///   {data_dir}/
    ///     ├── foo          (value of key "foo")
    ///     └── .hidden      (reserved, never listed)
    pub data_dir: PathBuf,

    /// Sort listings lexicographically instead of directory order
    pub sort_listings: bool,

    /// Serialize writes and deletes per key through a lock table
    pub serialize_writes: bool,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// HTTP listen address
    pub listen_addr: String,

    /// Log every request under the `audit` target
    pub audit: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./db"),
            sort_listings: true,
            serialize_writes: false,
            listen_addr: "127.0.0.1:3000".to_string(),
            audit: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse the listen address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr.parse().map_err(|e| {
            FlatError::Config(format!("invalid listen address {:?}: {}", self.listen_addr, e))
        })
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store root directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Sort listings (default: true)
    pub fn sort_listings(mut self, sort: bool) -> Self {
        self.config.sort_listings = sort;
        self
    }

    /// Serialize same-key writes (default: false)
    pub fn serialize_writes(mut self, serialize: bool) -> Self {
        self.config.serialize_writes = serialize;
        self
    }

    /// Set the HTTP listen address
    pub fn listen_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Enable request audit logging
    pub fn audit(mut self, audit: bool) -> Self {
        self.config.audit = audit;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
