//! Reporting view handlers
//!
//! Model summary, per-model confusion matrix, and the externally generated
//! feature-importance image. All data comes from the evaluation artifact
//! directory; a missing file surfaces as a 404 naming the file.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use stress_analysis_core::{ModelPerformance, ReportError};

use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub models: Vec<ModelPerformance>,
}

#[derive(Debug, Serialize)]
pub struct ConfusionResponse {
    pub model: String,
    pub labels: Vec<String>,
    /// counts[i][j] = actual labels[i], predicted labels[j]
    pub counts: Vec<Vec<u64>>,
    pub total: u64,
    pub correct: u64,
    pub accuracy: f32,
}

/// Performance summary over all evaluated models.
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<SummaryResponse>> {
    let models = state.store.load_summary()?;
    Ok(Json(SummaryResponse { models }))
}

/// Confusion matrix for one model's prediction table.
pub async fn confusion(
    State(state): State<AppState>,
    Path(model): Path<String>,
) -> AppResult<Json<ConfusionResponse>> {
    let matrix = state.store.confusion_matrix(&model)?;
    Ok(Json(ConfusionResponse {
        model,
        total: matrix.total(),
        correct: matrix.correct(),
        accuracy: matrix.accuracy(),
        labels: matrix.labels,
        counts: matrix.counts,
    }))
}

/// Feature-importance image for one model, when present.
pub async fn importance(
    State(state): State<AppState>,
    Path(model): Path<String>,
) -> AppResult<impl IntoResponse> {
    let path = state.store.importance_image(&model)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ReportError::from_io(path.clone(), e))?;
    Ok(([(header::CONTENT_TYPE, "image/png")], bytes))
}

// ============================================================================
// TESTS
// ============================================================================
