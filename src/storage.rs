//! Durable local storage for the dashboard stores.
//!
//! Each store persists its whole collection as one UTF-8 JSON string under a
//! fixed key. The backend contract is a plain read/write per key with no
//! transaction semantics; recovery from a torn or corrupt record is "parse
//! fails on load, start empty", handled by the stores, not here.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Storage key for the date-keyed goal entry map.
pub const GOAL_ENTRIES_KEY: &str = "goalEntries";

/// Storage key for the append-only audit log.
pub const AUDIT_LOGS_KEY: &str = "auditLogs";

// ═══════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Internal lock error")]
    LockPoisoned,
}

// ═══════════════════════════════════════════
// Backend trait
// ═══════════════════════════════════════════

/// Key/value persistence for whole-collection snapshots.
///
/// `write` replaces the full value under `key` in one step; there is no
/// partial update. `read` returns `None` for a key that was never written.
pub trait StorageBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keys are embedded in file names, so only a safe subset is accepted.
fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// ═══════════════════════════════════════════
// File-backed storage
// ═══════════════════════════════════════════

/// One `<key>.json` file per key under a root directory.
///
/// Writes go through a temp file and a rename, so a crash mid-write leaves
/// the previous record intact rather than a half-written one.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.root).map_err(io_err)?;
        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, self.path_for(key)).map_err(io_err)?;
        Ok(())
    }
}

// ═══════════════════════════════════════════
// In-memory storage
// ═══════════════════════════════════════════

/// Map-backed storage for tests and throwaway sessions.
///
/// Clones share the same underlying map, so a second store loaded from a
/// clone sees everything the first one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    map: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let map = self.map.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut map = self.map.lock().map_err(|_| StorageError::LockPoisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    // ───────────────────────────────────────
    // key validation tests
    // ───────────────────────────────────────

    #[test]
    fn known_store_keys_are_valid() {
        assert!(validate_key(GOAL_ENTRIES_KEY).is_ok());
        assert!(validate_key(AUDIT_LOGS_KEY).is_ok());
    }

    #[test]
    fn hostile_keys_rejected() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../../etc/passwd").is_err());
        assert!(validate_key("key with spaces").is_err());
        assert!(validate_key("key/with/slashes").is_err());
    }

    // ───────────────────────────────────────
    // MemoryStorage tests
    // ───────────────────────────────────────

    #[test]
    fn memory_read_missing_returns_none() {
        let storage = MemoryStorage::new();
        assert!(storage.read("goalEntries").unwrap().is_none());
    }

    #[test]
    fn memory_write_then_read_roundtrip() {
        let storage = MemoryStorage::new();
        storage.write("goalEntries", "{}").unwrap();
        assert_eq!(storage.read("goalEntries").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn memory_write_replaces_previous_value() {
        let storage = MemoryStorage::new();
        storage.write("auditLogs", "[]").unwrap();
        storage.write("auditLogs", "[1]").unwrap();
        assert_eq!(storage.read("auditLogs").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn memory_clones_share_contents() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        storage.write("goalEntries", "{\"a\":1}").unwrap();
        assert_eq!(
            clone.read("goalEntries").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
    }

    // ───────────────────────────────────────
    // FileStorage tests
    // ───────────────────────────────────────

    #[test]
    fn file_read_missing_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.read("goalEntries").unwrap().is_none());
    }

    #[test]
    fn file_write_then_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.write("goalEntries", "{\"2025-01-01\":{}}").unwrap();
        assert_eq!(
            storage.read("goalEntries").unwrap().as_deref(),
            Some("{\"2025-01-01\":{}}")
        );
    }

    #[test]
    fn file_write_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("state"));
        storage.write("auditLogs", "[]").unwrap();
        assert_eq!(storage.read("auditLogs").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_keys_map_to_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.write("auditLogs", "[]").unwrap();
        assert!(dir.path().join("auditLogs.json").exists());
        // No temp file left behind after the rename
        assert!(!dir.path().join("auditLogs.json.tmp").exists());
    }

    #[test]
    fn file_write_replaces_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.write("goalEntries", "{}").unwrap();
        storage.write("goalEntries", "{\"2025-01-01\":{\"goal-steps\":1.0}}").unwrap();
        let raw = storage.read("goalEntries").unwrap().unwrap();
        assert!(raw.contains("goal-steps"));
    }
}
