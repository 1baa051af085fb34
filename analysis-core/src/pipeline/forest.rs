//! Tree-ensemble classifier
//!
//! A forest of decision trees over the preprocessed feature row. Every node
//! (splits included) carries the class distribution of the training rows
//! that reached it, which is what makes path-attribution explanations
//! possible without re-touching the training data.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, ExplainError};

/// One node of a decision tree. Nodes are stored in a flat arena; index 0
/// is the root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        /// Class distribution at this node
        value: Vec<f32>,
    },
    Leaf {
        /// Class distribution at this leaf
        value: Vec<f32>,
    },
}

impl TreeNode {
    fn value(&self) -> &[f32] {
        match self {
            TreeNode::Split { value, .. } => value,
            TreeNode::Leaf { value } => value,
        }
    }
}

/// One fitted decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Follow the decision path for `x`, visiting `(split_feature,
    /// parent_value, child_value)` triples, and return the leaf value.
    fn walk<F>(&self, x: ArrayView1<'_, f32>, mut visit: F) -> Result<&[f32], String>
    where
        F: FnMut(usize, &[f32], &[f32]),
    {
        let mut index = 0usize;
        // A well-formed tree terminates well before nodes.len() steps;
        // the bound guards against cyclic child indices in a bad artifact.
        for _ in 0..=self.nodes.len() {
            let node = self
                .nodes
                .get(index)
                .ok_or_else(|| format!("node index {} out of bounds", index))?;
            match node {
                TreeNode::Leaf { value } => return Ok(value),
                TreeNode::Split { feature, threshold, left, right, value } => {
                    let raw = *x
                        .get(*feature)
                        .ok_or_else(|| format!("split feature {} out of bounds", feature))?;
                    let child = if raw <= *threshold { *left } else { *right };
                    let child_value = self
                        .nodes
                        .get(child)
                        .ok_or_else(|| format!("child index {} out of bounds", child))?
                        .value();
                    visit(*feature, value, child_value);
                    index = child;
                }
            }
        }
        Err("decision path does not terminate".to_string())
    }
}

/// The fitted classifier of the pipeline artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    /// Class labels, in the classifier's own ordering
    pub classes: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

impl ForestModel {
    /// Per-class probability vector for one feature row, aligned to
    /// `self.classes`. Averages the normalized leaf distributions.
    pub fn predict_proba(&self, x: ArrayView1<'_, f32>) -> Result<Vec<f32>, AnalysisError> {
        if self.trees.is_empty() {
            return Err(AnalysisError::Predict("model has no trees".to_string()));
        }
        let n_classes = self.classes.len();
        let mut acc = vec![0.0f32; n_classes];

        for tree in &self.trees {
            let leaf = tree
                .walk(x, |_, _, _| {})
                .map_err(AnalysisError::Predict)?;
            let dist = normalize(leaf, n_classes).map_err(AnalysisError::Predict)?;
            for (a, p) in acc.iter_mut().zip(dist.iter()) {
                *a += p;
            }
        }

        let n_trees = self.trees.len() as f32;
        for a in acc.iter_mut() {
            *a /= n_trees;
        }
        Ok(acc)
    }

    /// Index of the predicted class (first maximal probability).
    pub fn argmax(probabilities: &[f32]) -> usize {
        let mut best = 0usize;
        for (i, p) in probabilities.iter().enumerate() {
            if *p > probabilities[best] {
                best = i;
            }
        }
        best
    }

    /// Per-class, per-feature signed contributions for one feature row
    /// (path attribution: each split transfers probability mass between its
    /// node and the taken child, credited to the split feature).
    pub fn feature_contributions(
        &self,
        x: ArrayView1<'_, f32>,
    ) -> Result<Vec<Vec<f32>>, ExplainError> {
        if self.trees.is_empty() {
            return Err(ExplainError::Unavailable("model has no trees".to_string()));
        }
        let n_classes = self.classes.len();
        let n_features = x.len();
        let mut totals = vec![vec![0.0f32; n_features]; n_classes];

        for tree in &self.trees {
            let mut shape_error: Option<String> = None;
            tree.walk(x, |feature, parent, child| {
                let parent = match normalize(parent, n_classes) {
                    Ok(d) => d,
                    Err(e) => {
                        shape_error.get_or_insert(e);
                        return;
                    }
                };
                let child = match normalize(child, n_classes) {
                    Ok(d) => d,
                    Err(e) => {
                        shape_error.get_or_insert(e);
                        return;
                    }
                };
                if feature >= n_features {
                    shape_error.get_or_insert(format!("split feature {} out of bounds", feature));
                    return;
                }
                for class in 0..n_classes {
                    totals[class][feature] += child[class] - parent[class];
                }
            })
            .map_err(ExplainError::Unavailable)?;
            if let Some(e) = shape_error {
                return Err(ExplainError::ShapeMismatch(e));
            }
        }

        let n_trees = self.trees.len() as f32;
        for class in totals.iter_mut() {
            for c in class.iter_mut() {
                *c /= n_trees;
            }
        }
        Ok(totals)
    }
}

/// Normalize a node distribution, validating its width.
fn normalize(value: &[f32], n_classes: usize) -> Result<Vec<f32>, String> {
    if value.len() != n_classes {
        return Err(format!(
            "node value has {} entries, model has {} classes",
            value.len(),
            n_classes
        ));
    }
    let sum: f32 = value.iter().sum();
    if sum <= 0.0 || !sum.is_finite() {
        return Err("node value does not form a distribution".to_string());
    }
    Ok(value.iter().map(|v| v / sum).collect())
}

// ============================================================================
// TESTS
// ============================================================================
