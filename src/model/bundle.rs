//! Model Bundle - atomic four-artifact loader
//!
//! A bundle is {classifier, scaler, label encoder, feature columns} loaded
//! as one unit from a named directory. Partial load is not a valid state:
//! every file's existence is checked before anything is deserialized, and
//! any failure drops everything. On success the bundle is immutable for the
//! process lifetime and safe to share across threads without locking.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{EngineError, EngineResult};
use crate::features::schema;
use super::classifier::{Classifier, OnnxClassifier};
use super::labels::LabelEncoder;
use super::scaler::StandardScaler;

// ============================================================================
// ARTIFACT LAYOUT
// ============================================================================

pub const CLASSIFIER_FILE: &str = "classifier.onnx";
pub const SCALER_FILE: &str = "scaler.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";
pub const FEATURE_COLUMNS_FILE: &str = "feature_columns.json";

const ARTIFACTS: &[(&str, &str)] = &[
    ("classifier", CLASSIFIER_FILE),
    ("scaler", SCALER_FILE),
    ("label_encoder", LABEL_ENCODER_FILE),
    ("feature_columns", FEATURE_COLUMNS_FILE),
];

// ============================================================================
// BUNDLE
// ============================================================================

pub struct ModelBundle {
    classifier: Box<dyn Classifier>,
    scaler: StandardScaler,
    labels: LabelEncoder,
    feature_columns: Vec<String>,
    loaded_at: DateTime<Utc>,
}

impl ModelBundle {
    /// Load all four artifacts from a directory.
    ///
    /// No retry: a failure here is fatal to the service, predictions cannot
    /// proceed without a complete bundle.
    pub fn load(dir: &Path) -> EngineResult<Self> {
        log::info!("Loading model bundle from: {}", dir.display());

        // Existence pass first so a missing file is reported as missing,
        // never as a parse failure of a partial load.
        for &(artifact, file) in ARTIFACTS {
            let path = dir.join(file);
            if !path.exists() {
                return Err(EngineError::ArtifactMissing { artifact, path });
            }
        }

        let columns_body = read_artifact(dir, "feature_columns", FEATURE_COLUMNS_FILE)?;
        let feature_columns: Vec<String> =
            serde_json::from_str(&columns_body).map_err(|e| EngineError::ArtifactCorrupt {
                artifact: "feature_columns",
                reason: e.to_string(),
            })?;

        let labels = LabelEncoder::from_json(&read_artifact(dir, "label_encoder", LABEL_ENCODER_FILE)?)?;
        let scaler = StandardScaler::from_json(&read_artifact(dir, "scaler", SCALER_FILE)?)?;
        let classifier = OnnxClassifier::load(&dir.join(CLASSIFIER_FILE))?;

        Self::from_parts(Box::new(classifier), scaler, labels, feature_columns)
    }

    /// Assemble a bundle from pre-built components.
    ///
    /// Same invariant checks as `load`; intended for embedders supplying
    /// their own classifier runtime, and for tests.
    pub fn from_parts(
        classifier: Box<dyn Classifier>,
        scaler: StandardScaler,
        labels: LabelEncoder,
        feature_columns: Vec<String>,
    ) -> EngineResult<Self> {
        if feature_columns.is_empty() {
            return Err(EngineError::ArtifactCorrupt {
                artifact: "feature_columns",
                reason: "empty column list".to_string(),
            });
        }

        if scaler.n_features() != feature_columns.len() {
            return Err(EngineError::SchemaMismatch {
                what: "scaler dimensionality",
                expected: feature_columns.len(),
                actual: scaler.n_features(),
            });
        }

        if let Some(n) = classifier.n_features() {
            if n != feature_columns.len() {
                return Err(EngineError::SchemaMismatch {
                    what: "classifier input width",
                    expected: feature_columns.len(),
                    actual: n,
                });
            }
        }

        if let Some(c) = classifier.n_classes() {
            if c != labels.class_count() {
                return Err(EngineError::SchemaMismatch {
                    what: "classifier output classes",
                    expected: labels.class_count(),
                    actual: c,
                });
            }
        }

        if let Some(drift) = schema::describe_drift(&feature_columns) {
            log::warn!("{drift}");
        }

        log::info!(
            "Model bundle ready: {} features, {} classes",
            feature_columns.len(),
            labels.class_count()
        );

        Ok(Self {
            classifier,
            scaler,
            labels,
            feature_columns,
            loaded_at: Utc::now(),
        })
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    pub fn n_features(&self) -> usize {
        self.feature_columns.len()
    }

    pub fn class_names(&self) -> &[String] {
        self.labels.classes()
    }

    pub fn class_count(&self) -> usize {
        self.labels.class_count()
    }

    pub fn class_name(&self, index: usize) -> Option<&str> {
        self.labels.name_of(index)
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBundle")
            .field("features", &self.feature_columns.len())
            .field("classes", &self.labels.class_count())
            .field("loaded_at", &self.loaded_at)
            .finish()
    }
}

fn read_artifact(dir: &Path, artifact: &'static str, file: &str) -> EngineResult<String> {
    fs::read_to_string(dir.join(file)).map_err(|e| EngineError::ArtifactCorrupt {
        artifact,
        reason: e.to_string(),
    })
}

// ============================================================================
// TESTS
// ============================================================================
