//! Per-key lock table
//!
//! Serializes writers of the same key while different keys proceed in
//! parallel. Entries are dropped from the table once no guard or waiter
//! holds them, so the table only grows with keys under active contention.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};

/// Table of per-key mutexes
#[derive(Default)]
pub struct KeyLocks {
    table: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `key` is exclusively held by the returned guard
    pub fn lock(&self, key: &str) -> KeyGuard<'_> {
        // Clone under the table lock so Drop can trust the strong count
        let entry = {
            let mut table = self.table.lock();
            Arc::clone(table.entry(key.to_string()).or_default())
        };

        KeyGuard {
            locks: self,
            key: key.to_string(),
            guard: Some(entry.lock_arc()),
        }
    }

    /// Number of keys currently tracked
    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Exclusive hold on one key; released on drop
pub struct KeyGuard<'a> {
    locks: &'a KeyLocks,
    key: String,
    guard: Option<ArcMutexGuard<RawMutex, ()>>,
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        let mut table = self.locks.table.lock();
        drop(self.guard.take());

        let idle = table
            .get(&self.key)
            .is_some_and(|entry| Arc::strong_count(entry) == 1);
        if idle {
            table.remove(&self.key);
        }
    }
}
