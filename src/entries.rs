//! Date-keyed goal entry store.
//!
//! `entries[date][goal_id] = value`, with the whole map serialized to the
//! `goalEntries` record on every write. Write amplification is acceptable at
//! this scale (bounded by goals times days tracked for a single user).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::storage::{StorageBackend, StorageError, GOAL_ENTRIES_KEY};

/// Nested map: `YYYY-MM-DD` date key → goal id → recorded value.
pub type EntryMap = BTreeMap<String, BTreeMap<String, f64>>;

/// Errors from entry store writes. Loads never error; they fail soft.
#[derive(Debug, Error)]
pub enum EntryStoreError {
    #[error("Invalid entry value {0}: must be a finite, non-negative number")]
    InvalidValue(f64),

    #[error("Invalid date key: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] StorageError),
}

/// Owner of the entry map. The presentation layer never mutates entries
/// directly, only through [`EntryStore::save_entry`].
pub struct EntryStore {
    backend: Box<dyn StorageBackend>,
    entries: EntryMap,
}

impl EntryStore {
    /// Restore persisted entries at startup.
    ///
    /// Missing, corrupt, or wrong-shape data falls back to an empty map;
    /// the condition is logged, never raised to the caller.
    pub fn load(backend: Box<dyn StorageBackend>) -> Self {
        let entries = match backend.read(GOAL_ENTRIES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<EntryMap>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!("Discarding corrupt {GOAL_ENTRIES_KEY} record: {e}");
                    EntryMap::new()
                }
            },
            Ok(None) => EntryMap::new(),
            Err(e) => {
                tracing::warn!("Could not read {GOAL_ENTRIES_KEY} record: {e}");
                EntryMap::new()
            }
        };
        Self { backend, entries }
    }

    /// Insert or overwrite the value at `(date, goal_id)`, then persist the
    /// whole map. Latest write wins.
    ///
    /// Non-finite or negative values and malformed date keys are rejected
    /// before any mutation. A persistence failure is returned so the caller
    /// can surface it, but the in-memory write is retained; memory stays
    /// authoritative for the session.
    pub fn save_entry(
        &mut self,
        date: &str,
        goal_id: &str,
        value: f64,
    ) -> Result<(), EntryStoreError> {
        if !value.is_finite() || value < 0.0 {
            return Err(EntryStoreError::InvalidValue(value));
        }
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(EntryStoreError::InvalidDate(date.to_string()));
        }

        self.entries
            .entry(date.to_string())
            .or_default()
            .insert(goal_id.to_string(), value);

        self.persist()
    }

    /// Read accessor. `None` means "not yet recorded", distinct from a
    /// recorded zero.
    pub fn get(&self, date: &str, goal_id: &str) -> Option<f64> {
        self.entries
            .get(date)
            .and_then(|by_goal| by_goal.get(goal_id))
            .copied()
    }

    /// All recorded values for one date, keyed by goal id.
    pub fn values_for_date(&self, date: &str) -> BTreeMap<String, f64> {
        self.entries.get(date).cloned().unwrap_or_default()
    }

    /// The full entry map, for display and export.
    pub fn entries(&self) -> &EntryMap {
        &self.entries
    }

    fn persist(&self) -> Result<(), EntryStoreError> {
        let raw = serde_json::to_string(&self.entries)?;
        self.backend.write(GOAL_ENTRIES_KEY, &raw)?;
        tracing::debug!(dates = self.entries.len(), "Persisted goal entries");
        Ok(())
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
