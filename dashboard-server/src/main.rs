//! StressLens Dashboard Server
//!
//! HTTP surface of the employee stress analysis dashboard.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  STRESSLENS DASHBOARD                    │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌────────────────┐   ┌──────────────┐  │
//! │  │  Form     │   │  Analysis      │   │  Reporting   │  │
//! │  │  Surface  │──▶│  Engine        │   │  View        │  │
//! │  │  (Axum)   │   │  (pipeline)    │   │  (artifacts) │  │
//! │  └───────────┘   └────────┬───────┘   └──────┬───────┘  │
//! │                           ▼                  ▼           │
//! │                ┌──────────────────┐  ┌──────────────┐   │
//! │                │ pipeline artifact│  │ eval CSV/PNG │   │
//! │                └──────────────────┘  └──────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline artifact is loaded once at startup into an immutable
//! handle; every request only reads it.

mod config;
mod error;
mod handlers;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stress_analysis_core::{AnalysisEngine, EvaluationStore, PipelineArtifact};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stresslens_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("StressLens Dashboard starting...");
    tracing::info!("Pipeline artifact: {}", config.pipeline_path);
    tracing::info!("Evaluation artifacts: {}", config.reports_dir);

    // One-time artifact load; the server cannot run without a model
    let artifact = Arc::new(
        PipelineArtifact::load(Path::new(&config.pipeline_path))
            .context("loading pipeline artifact")?,
    );
    let engine = Arc::new(AnalysisEngine::new(artifact.clone()));
    let store = EvaluationStore::new(&config.reports_dir);

    let state = AppState { engine, artifact, store, config: config.clone() };
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("binding listen address")?;
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AnalysisEngine>,
    /// The concrete artifact behind the engine, kept for introspection
    pub artifact: Arc<PipelineArtifact>,
    pub store: EvaluationStore,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        // Form surface + analysis cycle
        .route("/api/v1/form/schema", get(handlers::analyze::form_schema))
        .route("/api/v1/analyze", post(handlers::analyze::analyze))
        // Reporting view
        .route("/api/v1/reports/summary", get(handlers::reports::summary))
        .route("/api/v1/reports/:model/confusion", get(handlers::reports::confusion))
        .route("/api/v1/reports/:model/importance", get(handlers::reports::importance))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}
