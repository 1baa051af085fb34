//! StressLens Analysis Core - Prediction & Explanation Engine
//!
//! Loads a fitted classification pipeline artifact (preprocessing transform +
//! tree-ensemble classifier), predicts a stress-level class for one employee
//! record, ranks the top feature influences, and maps the predicted level to
//! a management recommendation plan.
//!
//! ## Architecture
//!
//! - `record` - Employee attribute record (the form input)
//! - `pipeline/` - Pipeline artifact: layout, preprocessor, forest model
//! - `engine` - Analysis cycle (transform -> predict -> explain)
//! - `explain/` - Contribution shapes and influence ranking
//! - `recommend` - Stress level -> action plan mapping
//! - `report/` - Evaluation artifacts (summary, predictions, confusion matrix)

pub mod engine;
pub mod error;
pub mod explain;
pub mod pipeline;
pub mod recommend;
pub mod record;
pub mod report;

pub use engine::{AnalysisEngine, ClassProbability, ModelBundle, Prediction, StressAnalysis};
pub use error::{AnalysisError, ExplainError, ReportError};
pub use explain::{Contributions, Influence};
pub use pipeline::PipelineArtifact;
pub use recommend::{recommend, PlanSeverity, RecommendationPlan};
pub use record::{EmployeeRecord, Gender, JobRole, WorkLocation};
pub use report::{ConfusionMatrix, EvaluationStore, ModelPerformance};
