//! Analysis Engine - one record in, one analysis out
//!
//! Holds the immutable pipeline handle behind a trait seam so the concrete
//! artifact (or a deterministic stub in tests) can be swapped. The cycle is
//! transform -> predict -> explain; the first two are fatal to the request,
//! the explanation step only degrades the result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, ExplainError};
use crate::explain::{self, Contributions, Influence};
use crate::pipeline::ForestModel;
use crate::record::EmployeeRecord;

/// The contract the engine needs from a loaded pipeline artifact.
pub trait ModelBundle: Send + Sync {
    /// Class labels, in the classifier's own ordering
    fn classes(&self) -> &[String];

    /// Emitted (namespaced) feature names
    fn feature_names(&self) -> &[String];

    /// Preprocess one record into a numeric feature row
    fn transform(&self, record: &EmployeeRecord) -> Result<Array1<f32>, AnalysisError>;

    /// Per-class probabilities for one feature row
    fn predict_proba(&self, features: ArrayView1<'_, f32>) -> Result<Vec<f32>, AnalysisError>;

    /// Per-feature contribution values for one feature row
    fn contributions(&self, features: ArrayView1<'_, f32>) -> Result<Contributions, ExplainError>;
}

/// One class label with its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f32,
}

/// The prediction half of an analysis: always present on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted stress-level label
    pub label: String,
    /// Full distribution, in the classifier's class ordering
    pub class_probabilities: Vec<ClassProbability>,
}

/// The result of one analysis cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressAnalysis {
    pub prediction: Prediction,
    /// Top feature influences; `None` when the explanation step failed
    pub influences: Option<Vec<Influence>>,
    pub analyzed_at: DateTime<Utc>,
}

/// The prediction & explanation engine.
pub struct AnalysisEngine {
    bundle: Arc<dyn ModelBundle>,
}

impl AnalysisEngine {
    pub fn new(bundle: Arc<dyn ModelBundle>) -> Self {
        Self { bundle }
    }

    /// Class labels of the underlying model.
    pub fn classes(&self) -> &[String] {
        self.bundle.classes()
    }

    /// Run one synchronous analysis cycle for `record`.
    ///
    /// Transform and prediction failures abort the request. An explanation
    /// failure is caught here: the prediction is returned unchanged with
    /// `influences: None`.
    pub fn analyze(&self, record: &EmployeeRecord) -> Result<StressAnalysis, AnalysisError> {
        record.validate()?;

        let features = self.bundle.transform(record)?;
        let probabilities = self.bundle.predict_proba(features.view())?;

        let classes = self.bundle.classes();
        if probabilities.len() != classes.len() {
            return Err(AnalysisError::Predict(format!(
                "{} probabilities for {} classes",
                probabilities.len(),
                classes.len()
            )));
        }

        let predicted = ForestModel::argmax(&probabilities);
        let label = classes[predicted].clone();
        let class_probabilities = classes
            .iter()
            .zip(probabilities.iter())
            .map(|(label, p)| ClassProbability { label: label.clone(), probability: *p })
            .collect();

        let influences = match self.explain(features.view(), predicted) {
            Ok(ranked) => Some(ranked),
            Err(e) => {
                log::warn!("influence ranking unavailable: {}", e);
                None
            }
        };

        Ok(StressAnalysis {
            prediction: Prediction { label, class_probabilities },
            influences,
            analyzed_at: Utc::now(),
        })
    }

    fn explain(
        &self,
        features: ArrayView1<'_, f32>,
        class_index: usize,
    ) -> Result<Vec<Influence>, ExplainError> {
        let contributions = self.bundle.contributions(features)?;
        explain::rank_influences(self.bundle.feature_names(), &contributions, class_index)
    }
}

// ============================================================================
// TESTS
// ============================================================================
