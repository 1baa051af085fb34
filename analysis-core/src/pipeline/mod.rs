//! Pipeline Artifact
//!
//! The persisted bundle of a fitted preprocessing transform and a fitted
//! tree-ensemble classifier. Loaded once from a fixed local path at process
//! start into an immutable handle; everything downstream only reads it.

pub mod forest;
pub mod layout;
pub mod preprocess;

pub use forest::{DecisionTree, ForestModel, TreeNode};
pub use preprocess::{CategoricalColumn, NumericColumn, PreprocessorSpec};

use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::engine::ModelBundle;
use crate::error::{AnalysisError, ExplainError};
use crate::explain::Contributions;
use crate::record::EmployeeRecord;

/// On-disk artifact format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFile {
    pub schema_version: u8,
    /// CRC32 over the emitted feature names (see [`layout::layout_hash`])
    pub layout_hash: u32,
    pub preprocessor: PreprocessorSpec,
    pub model: ForestModel,
}

/// The loaded, immutable pipeline artifact.
#[derive(Debug)]
pub struct PipelineArtifact {
    preprocessor: PreprocessorSpec,
    model: ForestModel,
    feature_names: Vec<String>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl PipelineArtifact {
    /// Load the artifact from a local path.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        log::info!("Loading pipeline artifact from: {}", path.display());

        if !path.exists() {
            return Err(AnalysisError::Artifact(format!(
                "artifact not found: {}",
                path.display()
            )));
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::Artifact(format!("failed to read artifact: {}", e)))?;
        let file: ArtifactFile = serde_json::from_str(&raw)
            .map_err(|e| AnalysisError::Artifact(format!("failed to parse artifact: {}", e)))?;

        let artifact = Self::from_file(file, path.display().to_string())?;
        log::info!(
            "Pipeline artifact loaded: {} features, {} classes, {} trees",
            artifact.feature_names.len(),
            artifact.model.classes.len(),
            artifact.model.trees.len()
        );
        Ok(artifact)
    }

    /// Build an artifact directly from its parts (tests, fixtures).
    pub fn from_parts(
        preprocessor: PreprocessorSpec,
        model: ForestModel,
    ) -> Result<Self, AnalysisError> {
        if model.classes.is_empty() {
            return Err(AnalysisError::Artifact("model has no classes".to_string()));
        }
        let feature_names = preprocessor.feature_names();
        Ok(Self {
            preprocessor,
            model,
            feature_names,
            source: "<memory>".to_string(),
            loaded_at: Utc::now(),
        })
    }

    fn from_file(file: ArtifactFile, source: String) -> Result<Self, AnalysisError> {
        if file.schema_version != layout::ARTIFACT_SCHEMA_VERSION {
            return Err(AnalysisError::Artifact(format!(
                "unsupported artifact schema version {} (expected {})",
                file.schema_version,
                layout::ARTIFACT_SCHEMA_VERSION
            )));
        }

        let feature_names = file.preprocessor.feature_names();
        let computed = layout::layout_hash(&feature_names);
        if computed != file.layout_hash {
            return Err(AnalysisError::Artifact(format!(
                "feature layout mismatch: artifact hash {:#010x}, computed {:#010x}",
                file.layout_hash, computed
            )));
        }
        if file.model.classes.is_empty() {
            return Err(AnalysisError::Artifact("model has no classes".to_string()));
        }

        Ok(Self {
            preprocessor: file.preprocessor,
            model: file.model,
            feature_names,
            source,
            loaded_at: Utc::now(),
        })
    }

    /// Where this artifact was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl ModelBundle for PipelineArtifact {
    fn classes(&self) -> &[String] {
        &self.model.classes
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn transform(&self, record: &EmployeeRecord) -> Result<Array1<f32>, AnalysisError> {
        self.preprocessor.transform(record)
    }

    fn predict_proba(&self, features: ArrayView1<'_, f32>) -> Result<Vec<f32>, AnalysisError> {
        self.model.predict_proba(features)
    }

    fn contributions(&self, features: ArrayView1<'_, f32>) -> Result<Contributions, ExplainError> {
        let mut per_class = self.model.feature_contributions(features)?;
        // Binary ensembles expose one shared vector (the positive class);
        // multiclass ones expose a vector per class.
        if self.model.classes.len() == 2 {
            Ok(Contributions::Shared(per_class.swap_remove(1)))
        } else {
            Ok(Contributions::PerClass(per_class))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Gender, JobRole, WorkLocation};
    use std::io::Write;

    fn small_spec() -> PreprocessorSpec {
        PreprocessorSpec {
            numeric: vec![NumericColumn { name: "Age".into(), mean: 40.0, scale: 10.0 }],
            categorical: vec![CategoricalColumn {
                name: "Work_Location".into(),
                categories: vec!["Remote".into(), "Hybrid".into(), "Onsite".into()],
            }],
        }
    }

    fn small_forest(classes: Vec<String>) -> ForestModel {
        let width = classes.len();
        ForestModel {
            classes,
            trees: vec![DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 0,
                        threshold: 0.0,
                        left: 1,
                        right: 2,
                        value: vec![1.0 / width as f32; width],
                    },
                    TreeNode::Leaf { value: even_but_first(width) },
                    TreeNode::Leaf { value: even_but_last(width) },
                ],
            }],
        }
    }

    fn even_but_first(width: usize) -> Vec<f32> {
        let mut v = vec![0.2; width];
        v[0] = 0.6;
        v
    }

    fn even_but_last(width: usize) -> Vec<f32> {
        let mut v = vec![0.2; width];
        v[width - 1] = 0.6;
        v
    }

    fn artifact_json(spec: &PreprocessorSpec, model: &ForestModel, hash: Option<u32>) -> String {
        let names = spec.feature_names();
        let file = ArtifactFile {
            schema_version: layout::ARTIFACT_SCHEMA_VERSION,
            layout_hash: hash.unwrap_or_else(|| layout::layout_hash(&names)),
            preprocessor: spec.clone(),
            model: model.clone(),
        };
        serde_json::to_string_pretty(&file).unwrap()
    }

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_roundtrip() {
        let spec = small_spec();
        let model = small_forest(vec!["Low".into(), "Medium".into(), "High".into()]);
        let file = write_temp(&artifact_json(&spec, &model, None));

        let before = Utc::now();
        let artifact = PipelineArtifact::load(file.path()).unwrap();
        assert_eq!(artifact.classes(), ["Low", "Medium", "High"]);
        assert_eq!(artifact.feature_names().len(), 4);
        assert_eq!(artifact.source(), file.path().display().to_string());
        assert!(artifact.loaded_at() >= before);

        let record = EmployeeRecord::from_form(
            30,
            Gender::Male,
            JobRole::Manager,
            WorkLocation::Remote,
            40,
            3,
        );
        let row = artifact.transform(&record).unwrap();
        let probs = artifact.predict_proba(row.view()).unwrap();
        let sum: f32 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_artifact_is_reported() {
        let err = PipelineArtifact::load(Path::new("/nonexistent/pipeline.json")).unwrap_err();
        match err {
            AnalysisError::Artifact(msg) => assert!(msg.contains("not found")),
            other => panic!("expected Artifact error, got {:?}", other),
        }
    }

    #[test]
    fn test_layout_hash_mismatch_is_rejected() {
        let spec = small_spec();
        let model = small_forest(vec!["Low".into(), "High".into()]);
        let file = write_temp(&artifact_json(&spec, &model, Some(0xdeadbeef)));

        let err = PipelineArtifact::load(file.path()).unwrap_err();
        match err {
            AnalysisError::Artifact(msg) => assert!(msg.contains("layout mismatch")),
            other => panic!("expected Artifact error, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_schema_version_is_rejected() {
        let spec = small_spec();
        let model = small_forest(vec!["Low".into(), "High".into()]);
        let mut json: serde_json::Value =
            serde_json::from_str(&artifact_json(&spec, &model, None)).unwrap();
        json["schema_version"] = serde_json::json!(99);
        let file = write_temp(&json.to_string());

        assert!(matches!(
            PipelineArtifact::load(file.path()),
            Err(AnalysisError::Artifact(_))
        ));
    }

    #[test]
    fn test_binary_model_emits_shared_contributions() {
        let artifact = PipelineArtifact::from_parts(
            small_spec(),
            small_forest(vec!["Low".into(), "High".into()]),
        )
        .unwrap();
        let record = EmployeeRecord::from_form(
            55,
            Gender::Other,
            JobRole::DataAnalyst,
            WorkLocation::Onsite,
            60,
            2,
        );
        let row = artifact.transform(&record).unwrap();
        match artifact.contributions(row.view()).unwrap() {
            Contributions::Shared(values) => assert_eq!(values.len(), 4),
            other => panic!("expected Shared contributions, got {:?}", other),
        }
    }

    #[test]
    fn test_multiclass_model_emits_per_class_contributions() {
        let artifact = PipelineArtifact::from_parts(
            small_spec(),
            small_forest(vec!["Low".into(), "Medium".into(), "High".into()]),
        )
        .unwrap();
        let record = EmployeeRecord::from_form(
            30,
            Gender::Female,
            JobRole::SoftwareEngineer,
            WorkLocation::Hybrid,
            45,
            4,
        );
        let row = artifact.transform(&record).unwrap();
        match artifact.contributions(row.view()).unwrap() {
            Contributions::PerClass(per_class) => {
                assert_eq!(per_class.len(), 3);
                assert_eq!(per_class[0].len(), 4);
            }
            other => panic!("expected PerClass contributions, got {:?}", other),
        }
    }
}
