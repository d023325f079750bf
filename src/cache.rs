//! Durable key-value cache.
//!
//! The session mirrors the ledger's record count into a cache that survives
//! process restarts, scoped to wherever the embedder points it. Semantics
//! are deliberately minimal: a single string-keyed get/set cell with
//! last-write-wins and no versioning. Two concurrent writers can clobber
//! each other and no conflict detection exists at this layer.

use dashmap::DashMap;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// String-keyed durable cache collaborator.
pub trait KeyValueCache: Send + Sync {
    /// Read the last stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrite the value for `key` unconditionally.
    fn set(&self, key: &str, value: &str);
}

/// In-memory cache for tests and ephemeral embedding.
#[derive(Clone, Default)]
pub struct MemoryCache {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), value.to_string());
    }
}

/// JSON-file-backed cache. The full map is loaded at open and rewritten on
/// every `set`; write failures are logged and swallowed, the in-memory view
/// stays authoritative for the rest of the process lifetime.
#[derive(Clone)]
pub struct FileCache {
    inner: Arc<DashMap<String, String>>,
    path: PathBuf,
}

impl FileCache {
    /// Open the cache at `path`, hydrating from the file if it exists.
    pub fn open(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let cache = Self {
            inner: Arc::new(DashMap::new()),
            path,
        };

        if Path::new(&cache.path).exists() {
            let file = File::open(&cache.path)?;
            let reader = BufReader::new(file);
            let map: HashMap<String, String> = serde_json::from_reader(reader)?;
            for (k, v) in map {
                cache.inner.insert(k, v);
            }
            tracing::info!(
                path = %cache.path.display(),
                entries = cache.inner.len(),
                "Hydrated cache from file"
            );
        }
        Ok(cache)
    }

    fn flush(&self) -> std::io::Result<()> {
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        let map: HashMap<_, _> = self
            .inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        serde_json::to_writer(writer, &map)?;
        Ok(())
    }
}

impl KeyValueCache for FileCache {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), value.to_string());
        if let Err(err) = self.flush() {
            tracing::warn!(path = %self.path.display(), error = %err, "Cache flush failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_cache_last_write_wins() {
        let cache = MemoryCache::new();
        assert!(cache.get("transaction_count").is_none());

        cache.set("transaction_count", "3");
        cache.set("transaction_count", "5");
        assert_eq!(cache.get("transaction_count").as_deref(), Some("5"));
    }

    #[test]
    fn test_file_cache_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session_cache.json");

        let cache = FileCache::open(&path).unwrap();
        cache.set("transaction_count", "12");
        drop(cache);

        let reopened = FileCache::open(&path).unwrap();
        assert_eq!(reopened.get("transaction_count").as_deref(), Some("12"));
    }

    #[test]
    fn test_file_cache_overwrite_persists_latest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session_cache.json");

        let cache = FileCache::open(&path).unwrap();
        cache.set("transaction_count", "3");
        cache.set("transaction_count", "5");
        drop(cache);

        let reopened = FileCache::open(&path).unwrap();
        assert_eq!(reopened.get("transaction_count").as_deref(), Some("5"));
    }

    #[test]
    fn test_file_cache_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::open(dir.path().join("fresh.json")).unwrap();
        assert!(cache.get("anything").is_none());
    }
}
