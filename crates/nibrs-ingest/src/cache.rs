//! Process-wide memoization of cleaned tables.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use nibrs_model::CleanTable;
use tracing::debug;

use crate::csv::load_clean_table;

/// Identity of a source: the path or name exactly as the caller gave it.
///
/// Two spellings of the same file are two keys, and a file changed on disk
/// keeps its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceKey(String);

impl SourceKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Path> for SourceKey {
    fn from(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }
}

impl From<&str> for SourceKey {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for SourceKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type Slot = Arc<OnceLock<Arc<CleanTable>>>;

/// Cleaned tables keyed by source, computed at most once per key.
///
/// Concurrent first requests for one key wait for a single computation;
/// different keys compute independently. Entries live as long as the cache.
#[derive(Debug, Default)]
pub struct DatasetCache {
    slots: Mutex<HashMap<SourceKey, Slot>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &SourceKey) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Returns the cached table for `key`, computing it on first use.
    pub fn get_or_compute<F>(&self, key: impl Into<SourceKey>, compute: F) -> Arc<CleanTable>
    where
        F: FnOnce() -> CleanTable,
    {
        let key = key.into();
        let slot = self.slot(&key);
        Arc::clone(slot.get_or_init(|| {
            debug!(source = %key, "cache miss");
            Arc::new(compute())
        }))
    }

    /// Loads and normalizes a CSV file once; later calls share the result.
    pub fn get_or_load(&self, path: &Path) -> Arc<CleanTable> {
        self.get_or_compute(path, || load_clean_table(path))
    }

    /// The cached table for `key`, if it has been computed.
    pub fn get(&self, key: &SourceKey) -> Option<Arc<CleanTable>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).and_then(|slot| slot.get().cloned())
    }

    pub fn contains(&self, key: &SourceKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of computed entries.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
