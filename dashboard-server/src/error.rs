//! Error handling
//!
//! Maps the typed core errors onto HTTP responses: fatal-to-the-request
//! analysis failures carry the underlying error text, missing evaluation
//! files are reported by name with 404, everything else is a logged 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use stress_analysis_core::{AnalysisError, ReportError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request errors
    #[error("{0}")]
    Validation(String),

    /// Analysis errors (fatal to this request)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Reporting errors
    #[error("Missing evaluation file: {0}")]
    MissingArtifact(String),

    /// Generic errors; the message is logged, never sent to the client
    #[error("Internal server error")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Analysis(msg) => {
                tracing::error!("Analysis error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::MissingArtifact(_) => StatusCode::NOT_FOUND,
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidInput(msg) => AppError::Validation(msg),
            other => AppError::Analysis(other.to_string()),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::MissingArtifact(path) => {
                AppError::MissingArtifact(path.display().to_string())
            }
            other => AppError::InternalError(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_artifact_maps_to_404_with_filename() {
        let err: AppError =
            ReportError::MissingArtifact(PathBuf::from("data/reports/x_predictions.csv")).into();
        match err {
            AppError::MissingArtifact(name) => assert!(name.contains("x_predictions.csv")),
            other => panic!("expected MissingArtifact, got {:?}", other),
        }
        // Status code mapping
        let response = AppError::MissingArtifact("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let err: AppError = AnalysisError::InvalidInput("Age out of range".into()).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_display_messages_per_variant() {
        assert_eq!(
            AppError::MissingArtifact("x_predictions.csv".into()).to_string(),
            "Missing evaluation file: x_predictions.csv"
        );
        assert_eq!(
            AppError::Validation("Age out of range".into()).to_string(),
            "Age out of range"
        );
        // Internal details stay out of the client-facing message
        assert_eq!(
            AppError::InternalError("db exploded".into()).to_string(),
            "Internal server error"
        );
    }

    #[test]
    fn test_transform_failure_is_fatal_with_error_text() {
        let err: AppError = AnalysisError::Transform("unseen category".into()).into();
        match &err {
            AppError::Analysis(msg) => assert!(msg.contains("unseen category")),
            other => panic!("expected Analysis, got {:?}", other),
        }
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
