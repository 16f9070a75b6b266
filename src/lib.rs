//! # FlatKV
//!
//! A minimal persistent key-value store over HTTP:
//! - One regular file per key, the file contents are the value
//! - List / get / set / delete mapped 1:1 onto filesystem calls
//! - Bulk writes with per-key partial-failure isolation
//! - Optional per-key write serialization
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server (axum)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Request Handlers                           │
//! │          (one request → one store call → status + body)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Key Codec  │          │    Store    │
//!   │ (validate / │          │ (file per   │
//!   │  %-encode)  │          │    key)     │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ Store root  │
//!                           │ (directory) │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod key;
pub mod store;
pub mod http;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FlatError, Result};
pub use config::Config;
pub use store::{Store, WriteReport};
pub use http::Server;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of FlatKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
