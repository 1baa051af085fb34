//! Fitted preprocessing transform
//!
//! Applies the parameters the training run fitted: per-column
//! standardization for numeric attributes and one-hot encoding for
//! categorical attributes. Emitted feature names carry the `num__` /
//! `cat__` namespacing of the training pipeline; the explain layer strips
//! it for display.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::record::EmployeeRecord;

/// Fitted standardization parameters for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericColumn {
    pub name: String,
    pub mean: f32,
    pub scale: f32,
}

/// Fitted category list for one categorical column, in training order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub name: String,
    pub categories: Vec<String>,
}

/// The fitted preprocessing transform of the pipeline artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorSpec {
    pub numeric: Vec<NumericColumn>,
    pub categorical: Vec<CategoricalColumn>,
}

impl PreprocessorSpec {
    /// Emitted feature names, in the exact order `transform` fills them.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.feature_count());
        for col in &self.numeric {
            names.push(format!("num__{}", col.name));
        }
        for col in &self.categorical {
            for category in &col.categories {
                names.push(format!("cat__{}_{}", col.name, category));
            }
        }
        names
    }

    /// Width of the emitted feature row.
    pub fn feature_count(&self) -> usize {
        self.numeric.len()
            + self.categorical.iter().map(|c| c.categories.len()).sum::<usize>()
    }

    /// Transform one record into a numeric feature row.
    ///
    /// A column missing from the record or a category the training run
    /// never saw is a schema mismatch and fatal to the request.
    pub fn transform(&self, record: &EmployeeRecord) -> Result<Array1<f32>, AnalysisError> {
        let mut row = Vec::with_capacity(self.feature_count());

        for col in &self.numeric {
            let raw = record.numeric_value(&col.name).ok_or_else(|| {
                AnalysisError::Transform(format!("unknown numeric column '{}'", col.name))
            })?;
            // Guard against a degenerate fitted scale
            let scale = col.scale.max(1e-8);
            row.push((raw - col.mean) / scale);
        }

        for col in &self.categorical {
            let value = record.categorical_value(&col.name).ok_or_else(|| {
                AnalysisError::Transform(format!("unknown categorical column '{}'", col.name))
            })?;
            if !col.categories.iter().any(|c| c == value) {
                return Err(AnalysisError::Transform(format!(
                    "unseen category '{}' for column '{}'",
                    value, col.name
                )));
            }
            for category in &col.categories {
                row.push(if category == value { 1.0 } else { 0.0 });
            }
        }

        Ok(Array1::from_vec(row))
    }
}

// ============================================================================
// TESTS
// ============================================================================
