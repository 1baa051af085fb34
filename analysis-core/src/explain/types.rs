//! Contribution shapes and influence pairs

use serde::{Deserialize, Serialize};

/// Per-feature contribution values returned by an explainer.
///
/// The shape depends on the classifier: multiclass ensembles yield one
/// vector per class, binary ones a single shared vector. The variant is
/// resolved once by the explainer; ranking handles both.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", content = "values", rename_all = "snake_case")]
pub enum Contributions {
    /// One contribution vector per class, in the classifier's class order
    PerClass(Vec<Vec<f32>>),
    /// A single vector shared across classes
    Shared(Vec<f32>),
}

/// One ranked influence pair: display feature name + signed contribution
/// toward the predicted class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Influence {
    pub feature: String,
    pub contribution: f32,
}
