//! Provider-side patient roster logic: compliance derivation, search and
//! filtering, and the "mark reviewed" action.
//!
//! The roster itself is supplied by the caller (fetching and mock data are
//! presentation concerns); this module only derives from it.

use serde::{Deserialize, Serialize};

use crate::progress::percent_complete;

// ═══════════════════════════════════════════
// View types
// ═══════════════════════════════════════════

/// Point-in-time goal reading for one patient, as shown on the roster card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    /// Display label, e.g. "Steps" or "Sleep (hrs)".
    pub goal_type: String,
    pub value: f64,
    pub target: f64,
}

/// A preventive-care reminder attached to a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub title: String,
    /// YYYY-MM-DD
    pub date: String,
    pub completed: bool,
}

/// One row of the provider roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: u8,
    pub goals: Vec<GoalSnapshot>,
    pub reminders: Vec<Reminder>,
    pub allergies: Option<String>,
    pub medications: Option<String>,
    pub last_visit: Option<String>,
}

/// Derived compliance label for a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceStatus {
    GoalMet,
    Missed,
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalMet => write!(f, "Goal Met"),
            Self::Missed => write!(f, "Missed Preventive Checkup"),
        }
    }
}

/// Roster compliance filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RosterFilter {
    #[default]
    All,
    Met,
    Missed,
}

// ═══════════════════════════════════════════
// Derivations
// ═══════════════════════════════════════════

/// `Missed` if any reminder is incomplete, else `GoalMet`.
pub fn compliance_status(patient: &PatientSummary) -> ComplianceStatus {
    let missed = patient.reminders.iter().any(|r| !r.completed);
    if missed {
        ComplianceStatus::Missed
    } else {
        ComplianceStatus::GoalMet
    }
}

/// Clamped percent for a roster goal snapshot.
pub fn goal_percent(snapshot: &GoalSnapshot) -> u8 {
    percent_complete(Some(snapshot.value), snapshot.target)
}

/// First letters of the first two words of a name, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Case-insensitive substring search over name, email, and allergies,
/// combined with compliance filtering.
pub fn filter_patients<'a>(
    patients: &'a [PatientSummary],
    query: &str,
    filter: RosterFilter,
) -> Vec<&'a PatientSummary> {
    let query = query.trim().to_lowercase();
    patients
        .iter()
        .filter(|patient| {
            if !query.is_empty() {
                let matched = patient.name.to_lowercase().contains(&query)
                    || patient.email.to_lowercase().contains(&query)
                    || patient
                        .allergies
                        .as_deref()
                        .unwrap_or_default()
                        .to_lowercase()
                        .contains(&query);
                if !matched {
                    return false;
                }
            }
            match filter {
                RosterFilter::All => true,
                RosterFilter::Met => compliance_status(patient) == ComplianceStatus::GoalMet,
                RosterFilter::Missed => compliance_status(patient) != ComplianceStatus::GoalMet,
            }
        })
        .collect()
}

/// Mark every reminder complete (the provider "reviewed" action). The
/// caller records the action through the audit log.
pub fn mark_reviewed(patient: &mut PatientSummary) {
    for reminder in &mut patient.reminders {
        reminder.completed = true;
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
