//! Confusion matrix computation

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Cross-tabulation of actual vs. predicted labels.
///
/// `labels` is the sorted distinct union of both columns; `counts[i][j]` is
/// the number of records with actual label `labels[i]` predicted as
/// `labels[j]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub labels: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    /// Build the matrix from `(actual, predicted)` pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let labels: Vec<String> = pairs
            .iter()
            .flat_map(|(a, p)| [a.clone(), p.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let index = |label: &str| labels.iter().position(|l| l == label);
        let mut counts = vec![vec![0u64; labels.len()]; labels.len()];
        for (actual, predicted) in pairs {
            // Both labels are in the union by construction
            if let (Some(i), Some(j)) = (index(actual), index(predicted)) {
                counts[i][j] += 1;
            }
        }

        Self { labels, counts }
    }

    /// Count for one (actual, predicted) label pair.
    pub fn get(&self, actual: &str, predicted: &str) -> Option<u64> {
        let i = self.labels.iter().position(|l| l == actual)?;
        let j = self.labels.iter().position(|l| l == predicted)?;
        Some(self.counts[i][j])
    }

    /// Total number of records.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Number of correctly classified records (the diagonal).
    pub fn correct(&self) -> u64 {
        self.counts.iter().enumerate().map(|(i, row)| row[i]).sum()
    }

    /// Overall accuracy; 0 for an empty matrix.
    pub fn accuracy(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.correct() as f32 / total as f32
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
