//! File Store
//!
//! The key-value engine. Each operation is a direct filesystem call on a
//! single file under the store root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::Config;
use crate::error::{FlatError, Result};
use crate::key;

use super::{KeyGuard, KeyLocks, WriteReport};

/// Filesystem-backed key-value store
///
/// ## Concurrency:
/// - No internal locking by default: two writers of the same key race and
///   the last write to complete wins
/// - With `serialize_writes`, set/delete of the same key go through
///   `KeyLocks`; reads and listings never lock
/// - A listing may observe a partially written value
pub struct Store {
    /// Directory holding one file per key
    root: PathBuf,

    /// Sort listings lexicographically
    sort_listings: bool,

    /// Present only when same-key writes are serialized
    locks: Option<KeyLocks>,
}

impl Store {
    /// Upper bound on threads writing one bulk set
    pub const MAX_WRITERS: usize = 8;

    /// Open the store described by `config`, creating the root if absent
    pub fn open(config: &Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir).map_err(|e| {
            tracing::error!(
                path = %config.data_dir.display(),
                error = %e,
                "Couldn't create store root"
            );
            FlatError::StorageUnavailable {
                context: "store root".to_string(),
                source: e,
            }
        })?;

        tracing::debug!(path = %config.data_dir.display(), "Store opened");

        Ok(Self {
            root: config.data_dir.clone(),
            sort_listings: config.sort_listings,
            locks: config.serialize_writes.then(KeyLocks::new),
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified store root
    pub fn open_path(path: impl Into<PathBuf>) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(&config)
    }

    /// List keys, optionally restricted to those starting with `prefix`.
    ///
    /// Dot-prefixed names and subdirectories are never returned. The prefix
    /// is a plain string match on the stored (decoded) name.
    pub fn list(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| self.listing_error(e))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.listing_error(e))?;

            // Entries may vanish mid-listing; skip rather than fail
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                continue;
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::debug!(name = ?raw, "Skipping non UTF-8 filename");
                    continue;
                }
            };

            if name.starts_with('.') {
                continue;
            }
            if let Some(prefix) = prefix {
                if !name.starts_with(prefix) {
                    continue;
                }
            }

            keys.push(name);
        }

        if self.sort_listings {
            keys.sort();
        }

        tracing::debug!(count = keys.len(), prefix = ?prefix, "Listed keys");
        Ok(keys)
    }

    /// Read the value stored under `key`
    pub fn get(&self, key: &str) -> Result<Vec<u8>> {
        let key = key::normalize(key)?;
        let path = self.key_path(&key);

        fs::read(&path).map_err(|e| {
            let err = FlatError::from_io(&key, e);
            if !err.is_not_found() {
                tracing::error!(path = %path.display(), error = %err, "Couldn't read key");
            }
            err
        })
    }

    /// Write a single pair (create or truncate)
    pub fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let key = key::normalize(key)?;
        let path = self.key_path(&key);
        let _guard = self.lock_key(&key);

        fs::write(&path, value).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Couldn't write key");
            FlatError::StorageUnavailable {
                context: key.clone(),
                source: e,
            }
        })?;

        tracing::debug!(key = %key, bytes = value.len(), "Wrote key");
        Ok(())
    }

    /// Write every pair independently.
    ///
    /// Pairs are written concurrently by at most `MAX_WRITERS` scoped
    /// threads and the report is returned only after all of them have
    /// settled, in input order. A failed pair never blocks or rolls back the
    /// others. An empty input yields an empty report; rejecting it is up to
    /// the caller.
    pub fn set<K, V>(&self, pairs: &[(K, V)]) -> WriteReport
    where
        K: AsRef<str> + Sync,
        V: AsRef<[u8]> + Sync,
    {
        let mut report = WriteReport::new();

        if let [(key, value)] = pairs {
            let result = self.put(key.as_ref(), value.as_ref());
            self.record(&mut report, key.as_ref(), result);
            return report;
        }

        // Workers pull the next pair index until the input is drained
        let next = AtomicUsize::new(0);
        let workers = pairs.len().min(Self::MAX_WRITERS);

        let settled: Vec<(usize, Result<()>)> = crossbeam::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    scope.spawn(|_| {
                        let mut done = Vec::new();
                        loop {
                            let index = next.fetch_add(1, Ordering::Relaxed);
                            let Some((key, value)) = pairs.get(index) else {
                                break;
                            };
                            done.push((index, self.put(key.as_ref(), value.as_ref())));
                        }
                        done
                    })
                })
                .collect();

            // A panicked worker loses its outcomes; they surface below
            handles
                .into_iter()
                .filter_map(|handle| handle.join().ok())
                .flatten()
                .collect()
        })
        .unwrap_or_default();

        let mut outcomes: Vec<Option<Result<()>>> = pairs.iter().map(|_| None).collect();
        for (index, result) in settled {
            outcomes[index] = Some(result);
        }

        for ((key, _), outcome) in pairs.iter().zip(outcomes) {
            let result = outcome.unwrap_or_else(|| {
                Err(FlatError::StorageUnavailable {
                    context: key.as_ref().to_string(),
                    source: io::Error::new(io::ErrorKind::Other, "writer thread panicked"),
                })
            });
            self.record(&mut report, key.as_ref(), result);
        }

        if !report.is_success() {
            tracing::warn!(
                failed = report.failed_count(),
                total = pairs.len(),
                "Bulk write partially failed"
            );
        }
        report
    }

    /// Remove `key`.
    ///
    /// Removal is attempted directly and a missing file is classified from
    /// the resulting error, so there is no check-then-act window.
    pub fn delete(&self, key: &str) -> Result<()> {
        let key = key::normalize(key)?;
        let path = self.key_path(&key);
        let _guard = self.lock_key(&key);

        fs::remove_file(&path).map_err(|e| {
            let err = FlatError::from_io(&key, e);
            if !err.is_not_found() {
                tracing::error!(path = %path.display(), error = %err, "Couldn't delete key");
            }
            err
        })?;

        tracing::debug!(key = %key, "Deleted key");
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the store root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether same-key writes are serialized
    pub fn serializes_writes(&self) -> bool {
        self.locks.is_some()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Path of a normalized key
    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn lock_key(&self, key: &str) -> Option<KeyGuard<'_>> {
        self.locks.as_ref().map(|locks| locks.lock(key))
    }

    fn listing_error(&self, e: io::Error) -> FlatError {
        tracing::error!(path = %self.root.display(), error = %e, "Couldn't read store root");
        FlatError::StorageUnavailable {
            context: "listing".to_string(),
            source: e,
        }
    }

    fn record(&self, report: &mut WriteReport, key: &str, result: Result<()>) {
        match result {
            Ok(()) => report.record_written(key),
            Err(e) => report.record_failure(key, e),
        }
    }
}
