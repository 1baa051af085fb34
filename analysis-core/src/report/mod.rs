//! Evaluation Artifacts - the reporting view's data source
//!
//! Reads externally produced evaluation files from a base directory: a
//! model performance summary, per-model prediction tables (actual vs.
//! predicted labels), and per-model feature-importance images. Everything
//! is read-only; a missing file is a named condition, not a crash.
//!
//! The files are plain comma-separated tables without quoting, parsed the
//! same way the telemetry exports are written.

mod confusion;

pub use confusion::ConfusionMatrix;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// One row of the performance summary table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub model: String,
    pub accuracy: f32,
    pub precision: f32,
    pub recall: f32,
    pub f1_score: f32,
}

/// File name of the performance summary table.
pub const SUMMARY_FILE: &str = "model_performance_summary.csv";

/// Read-only store over the evaluation artifact directory.
#[derive(Debug, Clone)]
pub struct EvaluationStore {
    base_dir: PathBuf,
}

impl EvaluationStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Deterministic file-name slug for a model display name
    /// ("Random Forest" -> "random_forest").
    pub fn model_slug(display_name: &str) -> String {
        display_name
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Load the performance summary table.
    pub fn load_summary(&self) -> Result<Vec<ModelPerformance>, ReportError> {
        let path = self.base_dir.join(SUMMARY_FILE);
        let content = read_file(&path)?;

        let mut lines = content.lines();
        let header = lines
            .next()
            .ok_or_else(|| malformed(&path, "empty file"))?;
        if !header.trim_start().starts_with("Model") {
            return Err(malformed(&path, "expected a Model,... header"));
        }

        let mut rows = Vec::new();
        for (number, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 5 {
                return Err(malformed(&path, &format!("row {} has {} columns", number + 2, fields.len())));
            }
            rows.push(ModelPerformance {
                model: fields[0].to_string(),
                accuracy: parse_metric(&path, number + 2, fields[1])?,
                precision: parse_metric(&path, number + 2, fields[2])?,
                recall: parse_metric(&path, number + 2, fields[3])?,
                f1_score: parse_metric(&path, number + 2, fields[4])?,
            });
        }
        Ok(rows)
    }

    /// Load the `(actual, predicted)` label pairs for one model.
    pub fn load_predictions(&self, display_name: &str) -> Result<Vec<(String, String)>, ReportError> {
        let path = self
            .base_dir
            .join(format!("{}_predictions.csv", Self::model_slug(display_name)));
        let content = read_file(&path)?;

        let mut lines = content.lines();
        let header = lines
            .next()
            .ok_or_else(|| malformed(&path, "empty file"))?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        let actual_idx = columns
            .iter()
            .position(|c| *c == "Actual")
            .ok_or_else(|| malformed(&path, "no Actual column"))?;
        let predicted_idx = columns
            .iter()
            .position(|c| *c == "Predicted")
            .ok_or_else(|| malformed(&path, "no Predicted column"))?;

        let mut pairs = Vec::new();
        for (number, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let actual = fields.get(actual_idx);
            let predicted = fields.get(predicted_idx);
            match (actual, predicted) {
                (Some(a), Some(p)) => pairs.push((a.to_string(), p.to_string())),
                _ => {
                    return Err(malformed(
                        &path,
                        &format!("row {} is missing label columns", number + 2),
                    ))
                }
            }
        }
        Ok(pairs)
    }

    /// Confusion matrix for one model's prediction table.
    pub fn confusion_matrix(&self, display_name: &str) -> Result<ConfusionMatrix, ReportError> {
        let pairs = self.load_predictions(display_name)?;
        Ok(ConfusionMatrix::from_pairs(&pairs))
    }

    /// Path of the feature-importance image for one model, when present.
    pub fn importance_image(&self, display_name: &str) -> Result<PathBuf, ReportError> {
        let path = self
            .base_dir
            .join(format!("{}_feature_importance.png", Self::model_slug(display_name)));
        if !path.exists() {
            return Err(ReportError::MissingArtifact(path));
        }
        Ok(path)
    }
}

fn read_file(path: &Path) -> Result<String, ReportError> {
    std::fs::read_to_string(path).map_err(|e| ReportError::from_io(path.to_path_buf(), e))
}

fn malformed(path: &Path, reason: &str) -> ReportError {
    ReportError::Malformed { path: path.to_path_buf(), reason: reason.to_string() }
}

fn parse_metric(path: &Path, row: usize, field: &str) -> Result<f32, ReportError> {
    field
        .parse::<f32>()
        .map_err(|_| malformed(path, &format!("row {}: '{}' is not a number", row, field)))
}

// ============================================================================
// TESTS
// ============================================================================
