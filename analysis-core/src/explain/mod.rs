//! Influence Ranking
//!
//! Turns an explainer's raw per-feature contribution values into the
//! top-5 display ranking: pick the vector for the predicted class, strip
//! the preprocessor's namespacing from feature names, sort by descending
//! absolute contribution, truncate.

mod types;

pub use types::{Contributions, Influence};

use crate::error::ExplainError;

/// Maximum number of influences kept in a ranking.
pub const MAX_INFLUENCES: usize = 5;

/// Strip the preprocessor namespace (`num__Age` -> `Age`,
/// `cat__Gender_Male` -> `Gender_Male`).
pub fn display_name(raw: &str) -> &str {
    raw.split("__").last().unwrap_or(raw)
}

/// Rank feature influences for the predicted class.
pub fn rank_influences(
    feature_names: &[String],
    contributions: &Contributions,
    class_index: usize,
) -> Result<Vec<Influence>, ExplainError> {
    let values: &[f32] = match contributions {
        Contributions::PerClass(per_class) => per_class.get(class_index).ok_or_else(|| {
            ExplainError::ShapeMismatch(format!(
                "no contribution vector for class index {} ({} classes)",
                class_index,
                per_class.len()
            ))
        })?,
        Contributions::Shared(values) => values,
    };

    if values.len() != feature_names.len() {
        return Err(ExplainError::ShapeMismatch(format!(
            "{} contribution values for {} features",
            values.len(),
            feature_names.len()
        )));
    }

    let mut ranked: Vec<Influence> = feature_names
        .iter()
        .zip(values.iter())
        .map(|(name, value)| Influence {
            feature: display_name(name).to_string(),
            contribution: *value,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.contribution
            .abs()
            .partial_cmp(&a.contribution.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(MAX_INFLUENCES);

    Ok(ranked)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_display_name_strips_namespace() {
        assert_eq!(display_name("num__Age"), "Age");
        assert_eq!(display_name("cat__Gender_Male"), "Gender_Male");
        assert_eq!(display_name("Age"), "Age");
    }

    #[test]
    fn test_ranking_sorts_by_absolute_value_and_keeps_sign() {
        let feature_names = names(&[
            "num__Age",
            "num__Hours_Worked_Per_Week",
            "cat__Gender_Male",
            "cat__Work_Location_Remote",
            "cat__Industry_Tech",
            "num__Work_Life_Balance_Rating",
        ]);
        let contributions =
            Contributions::Shared(vec![0.05, -0.30, 0.10, 0.20, -0.01, -0.15]);

        let ranked = rank_influences(&feature_names, &contributions, 0).unwrap();

        assert_eq!(ranked.len(), MAX_INFLUENCES);
        assert_eq!(ranked[0].feature, "Hours_Worked_Per_Week");
        assert_eq!(ranked[0].contribution, -0.30);
        for pair in ranked.windows(2) {
            assert!(pair[0].contribution.abs() >= pair[1].contribution.abs());
        }
        // Smallest magnitude dropped
        assert!(!ranked.iter().any(|i| i.feature == "Industry_Tech"));
    }

    #[test]
    fn test_ranking_selects_the_predicted_class_vector() {
        let feature_names = names(&["num__Age", "num__Hours_Worked_Per_Week"]);
        let contributions = Contributions::PerClass(vec![
            vec![0.9, 0.0],
            vec![0.0, 0.4],
        ]);

        let ranked = rank_influences(&feature_names, &contributions, 1).unwrap();
        assert_eq!(ranked[0].feature, "Hours_Worked_Per_Week");
        assert_eq!(ranked[0].contribution, 0.4);
    }

    #[test]
    fn test_ranking_shorter_than_limit_when_few_features() {
        let ranked = rank_influences(
            &names(&["num__Age"]),
            &Contributions::Shared(vec![0.2]),
            0,
        )
        .unwrap();
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn test_missing_class_vector_is_a_shape_mismatch() {
        let err = rank_influences(
            &names(&["num__Age"]),
            &Contributions::PerClass(vec![vec![0.1]]),
            3,
        )
        .unwrap_err();
        assert!(matches!(err, ExplainError::ShapeMismatch(_)));
    }

    #[test]
    fn test_length_mismatch_is_a_shape_mismatch() {
        let err = rank_influences(
            &names(&["num__Age", "num__Hours_Worked_Per_Week"]),
            &Contributions::Shared(vec![0.1]),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, ExplainError::ShapeMismatch(_)));
    }

    #[test]
    fn test_ranked_names_are_prefix_free() {
        let ranked = rank_influences(
            &names(&["cat__Job_Role_Manager", "num__Age"]),
            &Contributions::Shared(vec![0.3, 0.1]),
            0,
        )
        .unwrap();
        for influence in &ranked {
            assert!(!influence.feature.contains("__"));
        }
    }
}
