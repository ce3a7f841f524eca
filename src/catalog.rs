//! Static catalog of trackable wellness goals.
//!
//! Fixed at process start; the entry store references goals by id but does
//! not validate membership (an entry for an unknown id is kept as-is).

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════
// Goal classification
// ═══════════════════════════════════════════

/// Classification of a trackable metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalType {
    Steps,
    Water,
    Sleep,
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Steps => write!(f, "steps"),
            Self::Water => write!(f, "water"),
            Self::Sleep => write!(f, "sleep"),
        }
    }
}

impl std::str::FromStr for GoalType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steps" => Ok(Self::Steps),
            "water" => Ok(Self::Water),
            "sleep" => Ok(Self::Sleep),
            other => Err(format!("Invalid goal type: {other}")),
        }
    }
}

// ═══════════════════════════════════════════
// Goal definition and catalog
// ═══════════════════════════════════════════

/// A trackable wellness metric with a daily numeric target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalDefinition {
    /// Stable unique identifier, immutable.
    pub id: String,
    pub label: String,
    pub goal_type: GoalType,
    pub unit: String,
    /// Denominator for the progress percentage. Positive.
    pub daily_target: f64,
}

/// Fixed, ordered sequence of goal definitions. Read-only.
#[derive(Debug, Clone)]
pub struct GoalCatalog {
    goals: Vec<GoalDefinition>,
}

impl GoalCatalog {
    /// The built-in wellness catalog: daily steps, water intake, sleep.
    pub fn builtin() -> Self {
        Self {
            goals: vec![
                GoalDefinition {
                    id: "goal-steps".into(),
                    label: "Daily Steps".into(),
                    goal_type: GoalType::Steps,
                    unit: "steps".into(),
                    daily_target: 10_000.0,
                },
                GoalDefinition {
                    id: "goal-water".into(),
                    label: "Water Intake".into(),
                    goal_type: GoalType::Water,
                    unit: "glasses".into(),
                    daily_target: 8.0,
                },
                GoalDefinition {
                    id: "goal-sleep".into(),
                    label: "Sleep".into(),
                    goal_type: GoalType::Sleep,
                    unit: "hours".into(),
                    daily_target: 8.0,
                },
            ],
        }
    }

    /// An empty catalog, useful for callers assembling their own.
    pub fn empty() -> Self {
        Self { goals: Vec::new() }
    }

    pub fn goals(&self) -> &[GoalDefinition] {
        &self.goals
    }

    pub fn get(&self, goal_id: &str) -> Option<&GoalDefinition> {
        self.goals.iter().find(|g| g.id == goal_id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }
}

impl Default for GoalCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_three_goals_in_order() {
        let catalog = GoalCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.goals()[0].id, "goal-steps");
        assert_eq!(catalog.goals()[1].id, "goal-water");
        assert_eq!(catalog.goals()[2].id, "goal-sleep");
    }

    #[test]
    fn builtin_targets_are_positive() {
        for goal in GoalCatalog::builtin().goals() {
            assert!(goal.daily_target > 0.0, "target for {}", goal.id);
        }
    }

    #[test]
    fn get_by_id() {
        let catalog = GoalCatalog::builtin();
        let steps = catalog.get("goal-steps").unwrap();
        assert_eq!(steps.label, "Daily Steps");
        assert_eq!(steps.daily_target, 10_000.0);
        assert_eq!(steps.unit, "steps");
    }

    #[test]
    fn get_unknown_id_is_none() {
        assert!(GoalCatalog::builtin().get("goal-unknown").is_none());
    }

    #[test]
    fn empty_catalog() {
        let catalog = GoalCatalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.get("goal-steps").is_none());
    }

    #[test]
    fn goal_type_display_roundtrip() {
        assert_eq!(GoalType::Steps.to_string(), "steps");
        assert_eq!(GoalType::Water.to_string(), "water");
        assert_eq!(GoalType::Sleep.to_string(), "sleep");

        assert_eq!("steps".parse::<GoalType>().unwrap(), GoalType::Steps);
        assert_eq!("water".parse::<GoalType>().unwrap(), GoalType::Water);
        assert_eq!("sleep".parse::<GoalType>().unwrap(), GoalType::Sleep);
    }

    #[test]
    fn invalid_goal_type_errors() {
        assert!("running".parse::<GoalType>().is_err());
        assert!("".parse::<GoalType>().is_err());
    }
}
