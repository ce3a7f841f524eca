//! Shared dashboard state.
//!
//! `DashboardState` is the one store object the presentation layer receives
//! at startup: constructed once, with an explicit load-from-storage step,
//! and passed by `Arc` rather than imported as a global. Uses `RwLock` for
//! the entry map to allow concurrent read access from UI callbacks.

use std::collections::BTreeMap;
use std::sync::{Mutex, RwLock};

use crate::audit::{AuditAction, AuditRecord, AuditStore, AuditStoreError};
use crate::catalog::GoalCatalog;
use crate::config;
use crate::entries::{EntryStore, EntryStoreError};
use crate::progress;
use crate::roster::{self, PatientSummary};
use crate::storage::{FileStorage, StorageBackend};

// ═══════════════════════════════════════════
// Error type
// ═══════════════════════════════════════════

/// Errors from DashboardState operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Entry store error: {0}")]
    Entry(#[from] EntryStoreError),
    #[error("Audit store error: {0}")]
    Audit(#[from] AuditStoreError),
}

/// Result of a composite save: whether each durable write landed.
///
/// `false` means the data is held in memory only and will not survive a
/// reload; the UI may surface a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub entry_persisted: bool,
    pub audit_persisted: bool,
    /// The audit record created for this save.
    pub record: AuditRecord,
}

// ═══════════════════════════════════════════
// DashboardState
// ═══════════════════════════════════════════

/// Transport-agnostic dashboard state: goal catalog, entry store, and
/// audit store behind one shared handle.
pub struct DashboardState {
    catalog: GoalCatalog,
    entries: RwLock<EntryStore>,
    audit: Mutex<AuditStore>,
}

impl DashboardState {
    /// Explicit initialization step: restore both stores from `storage`.
    pub fn load<B>(catalog: GoalCatalog, storage: B) -> Self
    where
        B: StorageBackend + Clone + 'static,
    {
        Self {
            catalog,
            entries: RwLock::new(EntryStore::load(Box::new(storage.clone()))),
            audit: Mutex::new(AuditStore::load(Box::new(storage))),
        }
    }

    /// The built-in catalog over file storage in the application state
    /// directory.
    pub fn open_default() -> Self {
        Self::load(GoalCatalog::builtin(), FileStorage::new(config::state_dir()))
    }

    pub fn catalog(&self) -> &GoalCatalog {
        &self.catalog
    }

    // ── Write intents ───────────────────────────────────────

    /// Save a goal entry and record the action in the audit log.
    ///
    /// Invalid input (non-finite or negative value, malformed date) is
    /// rejected before any mutation and no audit record is created. A
    /// persistence failure of either store is logged and reported through
    /// the returned [`SaveOutcome`]; the in-memory state remains
    /// authoritative for the session.
    pub fn save_goal_entry(
        &self,
        date: &str,
        goal_id: &str,
        value: f64,
    ) -> Result<SaveOutcome, StateError> {
        let entry_persisted = {
            let mut entries = self.entries.write().map_err(|_| StateError::LockPoisoned)?;
            match entries.save_entry(date, goal_id, value) {
                Ok(()) => true,
                Err(e @ EntryStoreError::InvalidValue(_))
                | Err(e @ EntryStoreError::InvalidDate(_)) => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("Goal entry held in memory only: {e}");
                    false
                }
            }
        };

        let details = format!("Goal {goal_id} logged for {date} with value {value}");
        let (record, audit_persisted) =
            self.append_event(AuditAction::GoalLogged, Some(details))?;

        Ok(SaveOutcome {
            entry_persisted,
            audit_persisted,
            record,
        })
    }

    /// Record an audit event. Persistence failures are logged and softened:
    /// the record is created and kept in memory either way.
    pub fn log_event(
        &self,
        action: AuditAction,
        details: Option<String>,
    ) -> Result<AuditRecord, StateError> {
        let (record, _persisted) = self.append_event(action, details)?;
        Ok(record)
    }

    /// Provider intent: record that a patient's profile was opened.
    pub fn view_patient(&self, patient_id: &str) -> Result<AuditRecord, StateError> {
        self.log_event(
            AuditAction::ViewPatient,
            Some(format!("Viewed patient {patient_id}")),
        )
    }

    /// Provider intent: complete every reminder for `patient` and record
    /// the review in the audit log.
    pub fn review_patient(&self, patient: &mut PatientSummary) -> Result<AuditRecord, StateError> {
        roster::mark_reviewed(patient);
        self.log_event(
            AuditAction::MarkReviewed,
            Some(format!("Patient {} marked reviewed", patient.id)),
        )
    }

    fn append_event(
        &self,
        action: AuditAction,
        details: Option<String>,
    ) -> Result<(AuditRecord, bool), StateError> {
        let mut audit = self.audit.lock().map_err(|_| StateError::LockPoisoned)?;
        match audit.append(action, details) {
            Ok(record) => Ok((record, true)),
            Err(e) => {
                tracing::warn!("Audit record held in memory only: {e}");
                // append pushes before persisting, so the record is present
                match audit.records().last() {
                    Some(record) => Ok((record.clone(), false)),
                    None => Err(StateError::Audit(e)),
                }
            }
        }
    }

    // ── Read accessors ──────────────────────────────────────

    /// Recorded value at `(date, goal_id)`; `None` means not yet recorded.
    pub fn entry(&self, date: &str, goal_id: &str) -> Result<Option<f64>, StateError> {
        let entries = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(entries.get(date, goal_id))
    }

    /// All recorded values for one date, keyed by goal id.
    pub fn values_for_date(&self, date: &str) -> Result<BTreeMap<String, f64>, StateError> {
        let entries = self.entries.read().map_err(|_| StateError::LockPoisoned)?;
        Ok(entries.values_for_date(date))
    }

    /// Aggregate percent-complete across the catalog for one date.
    pub fn daily_progress(&self, date: &str) -> Result<u8, StateError> {
        let values = self.values_for_date(date)?;
        Ok(progress::aggregate_progress(self.catalog.goals(), &values))
    }

    /// The audit log in insertion order (owned copy for display).
    pub fn audit_records(&self) -> Result<Vec<AuditRecord>, StateError> {
        let audit = self.audit.lock().map_err(|_| StateError::LockPoisoned)?;
        Ok(audit.records().to_vec())
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
