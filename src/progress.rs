//! Pure progress derivation over goal entries. No state, no side effects.

use std::collections::BTreeMap;

use crate::catalog::GoalDefinition;

/// Percent-complete for one goal, clamped to `[0, 100]`.
///
/// Absent, non-positive, and non-finite values score 0, as does a
/// non-positive target (division guard).
pub fn percent_complete(value: Option<f64>, target: f64) -> u8 {
    let Some(value) = value else {
        return 0;
    };
    if !value.is_finite() || value <= 0.0 || target <= 0.0 {
        return 0;
    }
    ((value / target).min(1.0) * 100.0).round() as u8
}

/// Arithmetic mean of [`percent_complete`] across all goals, rounded to the
/// nearest integer; 0 for an empty goal list.
///
/// Per-goal percents are rounded before the mean is taken, matching how the
/// dashboard displays the individual cards.
pub fn aggregate_progress(goals: &[GoalDefinition], values_by_goal_id: &BTreeMap<String, f64>) -> u8 {
    if goals.is_empty() {
        return 0;
    }
    let sum: u32 = goals
        .iter()
        .map(|goal| {
            u32::from(percent_complete(
                values_by_goal_id.get(&goal.id).copied(),
                goal.daily_target,
            ))
        })
        .sum();
    (f64::from(sum) / goals.len() as f64).round() as u8
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
