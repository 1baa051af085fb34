//! Form surface and analysis handlers
//!
//! One form submission -> one synchronous prediction cycle. The request
//! carries only the six form-exposed fields; the three remaining training
//! attributes are pinned server-side (see `record::from_form`).

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use stress_analysis_core::record::{
    AGE_RANGE, BALANCE_RANGE, DEFAULT_INDUSTRY, DEFAULT_MENTAL_HEALTH_CONDITION,
    DEFAULT_REMOTE_SUPPORT, HOURS_RANGE,
};
use stress_analysis_core::{
    recommend, ClassProbability, EmployeeRecord, Gender, Influence, JobRole, RecommendationPlan,
    WorkLocation,
};

use crate::{AppResult, AppState};

// ============================================================================
// FORM SCHEMA
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormField {
    Integer { name: &'static str, min: u32, max: u32, default: u32 },
    Select { name: &'static str, options: Vec<&'static str>, default: &'static str },
}

#[derive(Debug, Serialize)]
pub struct FormSchemaResponse {
    pub fields: Vec<FormField>,
    /// Attributes the form does not expose; pinned to training-time defaults
    pub fixed_defaults: serde_json::Value,
}

/// Describe the input form so any client can render it.
pub async fn form_schema(State(_state): State<AppState>) -> Json<FormSchemaResponse> {
    let fields = vec![
        FormField::Integer { name: "age", min: AGE_RANGE.0, max: AGE_RANGE.1, default: 30 },
        FormField::Select {
            name: "gender",
            options: Gender::ALL.iter().map(Gender::as_str).collect(),
            default: Gender::Male.as_str(),
        },
        FormField::Select {
            name: "job_role",
            options: JobRole::ALL.iter().map(JobRole::as_str).collect(),
            default: JobRole::SoftwareEngineer.as_str(),
        },
        FormField::Select {
            name: "work_location",
            options: WorkLocation::ALL.iter().map(WorkLocation::as_str).collect(),
            default: WorkLocation::Remote.as_str(),
        },
        FormField::Integer {
            name: "hours_worked_per_week",
            min: HOURS_RANGE.0,
            max: HOURS_RANGE.1,
            default: 40,
        },
        FormField::Integer {
            name: "work_life_balance_rating",
            min: BALANCE_RANGE.0,
            max: BALANCE_RANGE.1,
            default: 3,
        },
    ];

    Json(FormSchemaResponse {
        fields,
        fixed_defaults: serde_json::json!({
            "Company_Support_for_Remote_Work": DEFAULT_REMOTE_SUPPORT,
            "Industry": DEFAULT_INDUSTRY,
            "Mental_Health_Condition": DEFAULT_MENTAL_HEALTH_CONDITION,
        }),
    })
}

// ============================================================================
// ANALYSIS CYCLE
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(range(min = 18, max = 65))]
    pub age: u32,
    pub gender: Gender,
    pub job_role: JobRole,
    pub work_location: WorkLocation,
    #[validate(range(min = 20, max = 80))]
    pub hours_worked_per_week: u32,
    #[validate(range(min = 1, max = 5))]
    pub work_life_balance_rating: u32,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub stress_level: String,
    /// Full confidence distribution, in the classifier's class ordering
    pub confidence: Vec<ClassProbability>,
    /// Top-5 feature influences toward the predicted level, when available
    pub key_influencers: Option<Vec<Influence>>,
    /// Set when the influence ranking could not be computed
    pub influence_note: Option<String>,
    pub recommendation: RecommendationPlan,
    pub analyzed_at: DateTime<Utc>,
}

/// Run one analysis cycle for a submitted form.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeResponse>> {
    req.validate()?;

    let record = EmployeeRecord::from_form(
        req.age,
        req.gender,
        req.job_role,
        req.work_location,
        req.hours_worked_per_week,
        req.work_life_balance_rating,
    );

    let analysis = state.engine.analyze(&record)?;
    let recommendation = recommend(&analysis.prediction.label);

    let influence_note = if analysis.influences.is_none() {
        Some("Influence ranking unavailable; prediction and recommendations are unaffected.".to_string())
    } else {
        None
    };

    Ok(Json(AnalyzeResponse {
        stress_level: analysis.prediction.label,
        confidence: analysis.prediction.class_probabilities,
        key_influencers: analysis.influences,
        influence_note,
        recommendation,
        analyzed_at: analysis.analyzed_at,
    }))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::Arc;
    use stress_analysis_core::pipeline::{
        CategoricalColumn, DecisionTree, ForestModel, NumericColumn, PipelineArtifact,
        PreprocessorSpec, TreeNode,
    };
    use stress_analysis_core::{AnalysisEngine, EvaluationStore, PlanSeverity};

    fn test_state(dir: &tempfile::TempDir) -> AppState {
        let spec = PreprocessorSpec {
            numeric: vec![NumericColumn {
                name: "Hours_Worked_Per_Week".into(),
                mean: 50.0,
                scale: 15.0,
            }],
            categorical: vec![CategoricalColumn {
                name: "Work_Location".into(),
                categories: vec!["Remote".into(), "Hybrid".into(), "Onsite".into()],
            }],
        };
        // Long hours push toward High, short hours toward Low
        let model = ForestModel {
            classes: vec!["Low".into(), "Medium".into(), "High".into()],
            trees: vec![DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 0,
                        threshold: 0.0,
                        left: 1,
                        right: 2,
                        value: vec![0.35, 0.35, 0.30],
                    },
                    TreeNode::Leaf { value: vec![0.6, 0.3, 0.1] },
                    TreeNode::Leaf { value: vec![0.1, 0.2, 0.7] },
                ],
            }],
        };
        let artifact = Arc::new(PipelineArtifact::from_parts(spec, model).unwrap());
        AppState {
            engine: Arc::new(AnalysisEngine::new(artifact.clone())),
            artifact,
            store: EvaluationStore::new(dir.path()),
            config: crate::config::Config {
                pipeline_path: "<memory>".into(),
                reports_dir: dir.path().display().to_string(),
                port: 0,
                environment: "test".into(),
            },
        }
    }

    fn request(hours: u32) -> AnalyzeRequest {
        AnalyzeRequest {
            age: 30,
            gender: Gender::Male,
            job_role: JobRole::Manager,
            work_location: WorkLocation::Remote,
            hours_worked_per_week: hours,
            work_life_balance_rating: 3,
        }
    }

    #[tokio::test]
    async fn test_analyze_cycle_produces_a_full_response() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let Json(response) = analyze(State(state), Json(request(75))).await.unwrap();

        assert_eq!(response.stress_level, "High");
        let sum: f32 = response.confidence.iter().map(|p| p.probability).sum();
        assert!((sum - 1.0).abs() < 1e-6);
        assert_eq!(response.recommendation.severity, PlanSeverity::Urgent);

        let influencers = response.key_influencers.expect("influences present");
        assert!(influencers.len() <= 5);
        assert!(influencers.iter().all(|i| !i.feature.contains("__")));
        assert!(response.influence_note.is_none());
    }

    #[tokio::test]
    async fn test_short_hours_yield_maintenance_plan() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let Json(response) = analyze(State(state), Json(request(25))).await.unwrap();
        assert_eq!(response.stress_level, "Low");
        assert_eq!(response.recommendation.severity, PlanSeverity::Maintenance);
    }

    #[tokio::test]
    async fn test_out_of_range_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);

        let mut req = request(40);
        req.work_life_balance_rating = 9;
        let err = analyze(State(state), Json(req)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_form_schema_lists_all_six_fields() {
        let dir = tempfile::tempdir().unwrap();
        let Json(schema) = form_schema(State(test_state(&dir))).await;
        assert_eq!(schema.fields.len(), 6);
        assert_eq!(schema.fixed_defaults["Industry"], "Tech");
        assert_eq!(schema.fixed_defaults["Company_Support_for_Remote_Work"], 3);
    }
}
