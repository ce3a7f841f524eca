//! Append-only audit log of user-triggered dashboard actions.
//!
//! Records are immutable after creation; insertion order is the log's
//! canonical ordering. Most-recent-first display is a view concern and the
//! presentation layer reverses for itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::storage::{StorageBackend, StorageError, AUDIT_LOGS_KEY};

// ═══════════════════════════════════════════
// Action kinds
// ═══════════════════════════════════════════

/// Tracked action kinds. Closed set; persisted as the wire strings
/// `GOAL_LOGGED` / `VIEW_PATIENT` / `MARK_REVIEWED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// A goal entry was saved.
    GoalLogged,
    /// A provider opened a patient's record.
    ViewPatient,
    /// A provider marked a patient's reminders reviewed.
    MarkReviewed,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalLogged => write!(f, "GOAL_LOGGED"),
            Self::ViewPatient => write!(f, "VIEW_PATIENT"),
            Self::MarkReviewed => write!(f, "MARK_REVIEWED"),
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GOAL_LOGGED" => Ok(Self::GoalLogged),
            "VIEW_PATIENT" => Ok(Self::ViewPatient),
            "MARK_REVIEWED" => Ok(Self::MarkReviewed),
            other => Err(format!("Invalid audit action: {other}")),
        }
    }
}

// ═══════════════════════════════════════════
// Record type
// ═══════════════════════════════════════════

/// An immutable record of one tracked action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique id, `log-<uuid>`.
    pub id: String,
    /// Creation instant, RFC 3339 in the persisted record.
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    #[serde(default)]
    pub details: Option<String>,
}

// ═══════════════════════════════════════════
// Store
// ═══════════════════════════════════════════

/// Errors from audit store appends. Loads never error; they fail soft.
#[derive(Debug, Error)]
pub enum AuditStoreError {
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] StorageError),
}

/// Owner of the ordered log. Append-only; nothing is edited or removed.
pub struct AuditStore {
    backend: Box<dyn StorageBackend>,
    records: Vec<AuditRecord>,
}

impl AuditStore {
    /// Restore the persisted log at startup.
    ///
    /// Missing, corrupt, or non-array data (including an array with an
    /// unknown action string) falls back to an empty log; the condition is
    /// logged, never raised to the caller.
    pub fn load(backend: Box<dyn StorageBackend>) -> Self {
        let records = match backend.read(AUDIT_LOGS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<AuditRecord>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!("Discarding corrupt {AUDIT_LOGS_KEY} record: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Could not read {AUDIT_LOGS_KEY} record: {e}");
                Vec::new()
            }
        };
        Self { backend, records }
    }

    /// Construct a record with a fresh unique id and the current instant,
    /// append it, persist the full sequence, and return it.
    ///
    /// A persistence failure is returned so the caller can surface it, but
    /// the record stays in the in-memory log; it simply will not survive a
    /// reload.
    pub fn append(
        &mut self,
        action: AuditAction,
        details: Option<String>,
    ) -> Result<AuditRecord, AuditStoreError> {
        let record = AuditRecord {
            id: format!("log-{}", Uuid::new_v4()),
            timestamp: Utc::now(),
            action,
            details,
        };
        self.records.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// The log in insertion order.
    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn persist(&self) -> Result<(), AuditStoreError> {
        let raw = serde_json::to_string(&self.records)?;
        self.backend.write(AUDIT_LOGS_KEY, &raw)?;
        tracing::debug!(count = self.records.len(), "Persisted audit log");
        Ok(())
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
