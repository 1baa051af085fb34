//! Recommendation Selector
//!
//! Total mapping from the predicted stress level to a fixed three-action
//! management plan. No state, no computation beyond the branch.

use serde::{Deserialize, Serialize};

/// Urgency tier of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSeverity {
    Urgent,
    Moderate,
    Maintenance,
}

/// A canned management plan: severity tier plus exactly three actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationPlan {
    pub severity: PlanSeverity,
    pub actions: [&'static str; 3],
}

const URGENT_ACTIONS: [&str; 3] = [
    "Immediate workload review",
    "Mandatory counseling",
    "Flexible hours activation",
];

const MODERATE_ACTIONS: [&str; 3] = [
    "Weekly check-ins",
    "Stress management resources",
    "Workload monitoring",
];

const MAINTENANCE_ACTIONS: [&str; 3] = [
    "Maintain current programs",
    "Encourage PTO",
    "Regular wellness checks",
];

/// Select the management plan for a predicted stress level.
///
/// Total over all labels: anything that is not "High" or "Medium" (unseen
/// labels included) falls through to the maintenance plan.
pub fn recommend(stress_level: &str) -> RecommendationPlan {
    match stress_level {
        "High" => RecommendationPlan { severity: PlanSeverity::Urgent, actions: URGENT_ACTIONS },
        "Medium" => {
            RecommendationPlan { severity: PlanSeverity::Moderate, actions: MODERATE_ACTIONS }
        }
        _ => RecommendationPlan {
            severity: PlanSeverity::Maintenance,
            actions: MAINTENANCE_ACTIONS,
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_gets_the_urgent_plan() {
        let plan = recommend("High");
        assert_eq!(plan.severity, PlanSeverity::Urgent);
        assert_eq!(
            plan.actions,
            ["Immediate workload review", "Mandatory counseling", "Flexible hours activation"]
        );
    }

    #[test]
    fn test_medium_gets_the_moderate_plan() {
        let plan = recommend("Medium");
        assert_eq!(plan.severity, PlanSeverity::Moderate);
        assert_eq!(
            plan.actions,
            ["Weekly check-ins", "Stress management resources", "Workload monitoring"]
        );
    }

    #[test]
    fn test_low_and_unseen_labels_get_the_maintenance_plan() {
        for label in ["Low", "Critical", "", "medium"] {
            let plan = recommend(label);
            assert_eq!(plan.severity, PlanSeverity::Maintenance);
            assert_eq!(
                plan.actions,
                ["Maintain current programs", "Encourage PTO", "Regular wellness checks"]
            );
        }
    }
}
