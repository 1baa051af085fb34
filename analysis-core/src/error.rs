//! Error types for the analysis engine
//!
//! Two failure domains per analysis request: `AnalysisError` is fatal to the
//! request (no result is produced), `ExplainError` is degradable (the
//! prediction survives, only the influence ranking is dropped).
//! `ReportError` covers the evaluation-artifact side of the house.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that are fatal to one analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Record violates a field range or enum constraint
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Pipeline artifact could not be loaded or is incompatible
    #[error("pipeline artifact error: {0}")]
    Artifact(String),

    /// Preprocessing transform failed (unseen category, schema mismatch)
    #[error("input transform failed: {0}")]
    Transform(String),

    /// Classifier failed to produce a prediction
    #[error("prediction failed: {0}")]
    Predict(String),
}

/// Failures of the explanation step.
///
/// Callers must treat these as degradable: the already-computed prediction
/// stays valid, only the influence ranking is unavailable.
#[derive(Debug, Error)]
pub enum ExplainError {
    /// Contribution vector does not line up with the feature layout or classes
    #[error("contribution shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Explainer could not be constructed or evaluated
    #[error("explainer unavailable: {0}")]
    Unavailable(String),
}

/// Failures while reading evaluation artifacts (reporting view).
#[derive(Debug, Error)]
pub enum ReportError {
    /// An expected file does not exist; reported by path, never a crash
    #[error("missing evaluation file: {}", .0.display())]
    MissingArtifact(PathBuf),

    /// A file exists but its content could not be parsed
    #[error("malformed evaluation file {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    /// Any other I/O failure
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Map an I/O error on `path`, turning `NotFound` into the named
    /// missing-artifact condition.
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ReportError::MissingArtifact(path)
        } else {
            ReportError::Io { path, source }
        }
    }
}
