//! Error taxonomy for the prediction core.
//!
//! Load-time errors (`ArtifactMissing`, `ArtifactCorrupt`, `SchemaMismatch`)
//! are fatal: without a complete bundle there is nothing to predict with.
//! Per-request errors (`MissingFeatures`, `InvalidFeatureType`) are
//! caller-correctable. `InferenceFailure` is surfaced as-is and never retried
//! by the core.

use std::path::PathBuf;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A required artifact file is absent from the bundle directory.
    #[error("missing model artifact '{artifact}' at {path}")]
    ArtifactMissing { artifact: &'static str, path: PathBuf },

    /// An artifact file exists but could not be deserialized.
    #[error("corrupt model artifact '{artifact}': {reason}")]
    ArtifactCorrupt { artifact: &'static str, reason: String },

    /// A bundle invariant is violated (dimensionality disagreement between
    /// artifacts). Programmer/export error, not caller-correctable.
    #[error("schema mismatch in {what}: expected {expected}, got {actual}")]
    SchemaMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Strict validation found required columns absent from the input.
    /// Lists every absent column, not just the first.
    #[error("missing required features: [{}]", .features.join(", "))]
    MissingFeatures { features: Vec<String> },

    /// A feature carried a non-numeric value.
    #[error("invalid value for feature '{feature}': expected a number, found {found}")]
    InvalidFeatureType { feature: String, found: String },

    /// Unexpected failure inside the classifier/scaler call.
    #[error("inference failure: {0}")]
    InferenceFailure(String),
}

impl EngineError {
    /// Whether the caller can fix this by correcting the request.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::MissingFeatures { .. } | EngineError::InvalidFeatureType { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_features_lists_all_names() {
        let err = EngineError::MissingFeatures {
            features: vec!["Temperature".to_string(), "hrv_mean_hr".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Temperature"));
        assert!(msg.contains("hrv_mean_hr"));
    }

    #[test]
    fn test_recoverable_classification() {
        let missing = EngineError::MissingFeatures { features: vec![] };
        let invalid = EngineError::InvalidFeatureType {
            feature: "Age".to_string(),
            found: "boolean".to_string(),
        };
        let corrupt = EngineError::ArtifactCorrupt {
            artifact: "scaler",
            reason: "bad json".to_string(),
        };
        let inference = EngineError::InferenceFailure("session error".to_string());

        assert!(missing.is_recoverable());
        assert!(invalid.is_recoverable());
        assert!(!corrupt.is_recoverable());
        assert!(!inference.is_recoverable());
    }
}
