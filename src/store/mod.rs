//! Store Module
//!
//! The filesystem IS the database: one regular file per key directly under
//! the store root, file contents are the value.
//!
//! ## Responsibilities
//! - List keys (dot-prefixed names are reserved and never listed)
//! - Read, write and remove single key files
//! - Bulk writes with partial-failure isolation
//!
//! ## Layout
//! ```text
//! {data_dir}/
//!   ├── foo        <- key "foo"
//!   ├── bar baz    <- key "bar baz"
//!   └── .keep      <- reserved, hidden from listings
//! ```
//!
//! There is no caching and no index. Concurrent writes to the same key race
//! and the last one to complete wins, unless per-key serialization is
//! enabled in the config.

mod file_store;
mod locks;
mod report;

pub use file_store::Store;
pub use locks::{KeyGuard, KeyLocks};
pub use report::{WriteFailure, WriteReport};
