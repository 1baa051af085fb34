//! Health check handler
//!
//! Reports liveness plus the loaded pipeline artifact: a healthy response
//! means the one-time artifact load succeeded and the engine is serving.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use stress_analysis_core::ModelBundle;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    /// Where the pipeline artifact was loaded from
    pipeline_source: String,
    pipeline_loaded_at: DateTime<Utc>,
    /// Number of stress-level classes the loaded classifier predicts
    class_count: usize,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        pipeline_source: state.artifact.source().to_string(),
        pipeline_loaded_at: state.artifact.loaded_at(),
        class_count: state.artifact.classes().len(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
