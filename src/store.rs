//! Durable client-side state
//!
//! The web front-ends this backend was built for keep the session token in
//! local storage and the fit preference in a cookie. This module is the
//! crate's stand-in for both: a narrow get/set/remove contract with optional
//! per-entry expiry, injected through the composition root so nothing in the
//! crate reaches for ambient global state.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Durable key/value storage for client-side state.
///
/// Writes are synchronous and, like a browser cookie write, cannot fail from
/// the caller's perspective; implementations keep their in-memory view
/// authoritative and treat persistence problems as best-effort.
pub trait DurableStore: Send + Sync {
    /// Read an entry; expired entries read as absent
    fn get(&self, name: &str) -> Option<String>;

    /// Write an entry, optionally with a time-to-live
    fn set(&self, name: &str, value: &str, ttl: Option<Duration>);

    /// Remove an entry if present
    fn remove(&self, name: &str);
}

/// A single stored entry with optional expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    value: String,
    expires_at: Option<i64>,
}

impl Entry {
    fn new(value: &str, ttl: Option<Duration>) -> Self {
        Self {
            value: value.to_string(),
            expires_at: ttl.map(|ttl| unix_now() + ttl.as_secs() as i64),
        }
    }

    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => unix_now() >= expires_at,
            None => false,
        }
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_secs() as i64
}

/// In-memory store. The default backing; state does not survive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, name: &str) -> Option<String> {
        let entries = self.entries.read().unwrap();
        entries
            .get(name)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    fn set(&self, name: &str, value: &str, ttl: Option<Duration>) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(name.to_string(), Entry::new(value, ttl));
    }

    fn remove(&self, name: &str) {
        let mut entries = self.entries.write().unwrap();
        entries.remove(name);
    }
}

/// File-backed store: one JSON file mapping entry names to values.
///
/// Hydrated once on construction; every write rewrites the file with expired
/// entries pruned. An unreadable or corrupt file hydrates as empty rather
/// than failing construction.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, Entry>>,
}

impl FileStore {
    /// Open (or create on first write) the store at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::hydrate(&path);
        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn hydrate(path: &Path) -> HashMap<String, Entry> {
        match fs::read_to_string(path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }

    fn flush(&self, entries: &HashMap<String, Entry>) {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(err) => {
                log::debug!("failed to encode durable store: {}", err);
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, raw) {
            log::debug!("failed to flush durable store to {:?}: {}", self.path, err);
        }
    }
}

impl DurableStore for FileStore {
    fn get(&self, name: &str) -> Option<String> {
        let entries = self.entries.read().unwrap();
        entries
            .get(name)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.value.clone())
    }

    fn set(&self, name: &str, value: &str, ttl: Option<Duration>) {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|_, entry| !entry.is_expired());
        entries.insert(name.to_string(), Entry::new(value, ttl));
        self.flush(&entries);
    }

    fn remove(&self, name: &str) {
        let mut entries = self.entries.write().unwrap();
        entries.remove(name);
        self.flush(&entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("fit"), None);

        store.set("fit", "{\"size\":\"L\"}", None);
        assert_eq!(store.get("fit"), Some("{\"size\":\"L\"}".to_string()));

        store.remove("fit");
        assert_eq!(store.get("fit"), None);
    }

    #[test]
    fn expired_entries_read_as_absent() {
        let store = MemoryStore::new();
        store.set("token", "abc", Some(Duration::from_secs(0)));
        assert_eq!(store.get("token"), None);

        store.set("token", "abc", Some(Duration::from_secs(3600)));
        assert_eq!(store.get("token"), Some("abc".to_string()));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStore::new(&path);
        store.set("token", "abc", None);
        store.set("fit", "{}", Some(Duration::from_secs(3600)));
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("token"), Some("abc".to_string()));
        assert_eq!(reopened.get("fit"), Some("{}".to_string()));
    }

    #[test]
    fn file_store_prunes_expired_entries_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = FileStore::new(&path);
        store.set("stale", "old", Some(Duration::from_secs(0)));
        store.set("token", "abc", None);

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("stale"), None);
        assert_eq!(reopened.get("token"), Some("abc".to_string()));
    }

    #[test]
    fn corrupt_file_hydrates_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json at all").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("token"), None);

        // The store stays usable and repairs the file on the next write
        store.set("token", "abc", None);
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("token"), Some("abc".to_string()));
    }
}
