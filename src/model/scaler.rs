//! Standard scaler - fitted numeric transform
//!
//! `x' = (x - mean) / scale`, parameters exported at training time as
//! `scaler.json`. Stateless at inference beyond the fitted parameters.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Fitted standard scaler parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl StandardScaler {
    /// Build from fitted parameters.
    ///
    /// Zero scale entries are normalized to 1.0 at construction: a constant
    /// training column exports scale 0, and dividing by it would poison the
    /// vector with infinities. The normalization cannot change output for a
    /// correctly exported scaler.
    pub fn new(mean: Vec<f32>, mut scale: Vec<f32>) -> EngineResult<Self> {
        if mean.len() != scale.len() {
            return Err(EngineError::ArtifactCorrupt {
                artifact: "scaler",
                reason: format!(
                    "mean has {} entries but scale has {}",
                    mean.len(),
                    scale.len()
                ),
            });
        }
        if mean.is_empty() {
            return Err(EngineError::ArtifactCorrupt {
                artifact: "scaler",
                reason: "empty parameter vectors".to_string(),
            });
        }

        for s in &mut scale {
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Ok(Self { mean, scale })
    }

    /// Parse from the `scaler.json` artifact body.
    pub fn from_json(body: &str) -> EngineResult<Self> {
        #[derive(Deserialize)]
        struct Raw {
            mean: Vec<f32>,
            scale: Vec<f32>,
        }

        let raw: Raw = serde_json::from_str(body).map_err(|e| EngineError::ArtifactCorrupt {
            artifact: "scaler",
            reason: e.to_string(),
        })?;
        Self::new(raw.mean, raw.scale)
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    /// Transform one ordered feature row into model space.
    ///
    /// A dimensionality mismatch here is a bundle invariant violation, not a
    /// caller error.
    pub fn transform(&self, row: &[f32]) -> EngineResult<Vec<f32>> {
        if row.len() != self.mean.len() {
            return Err(EngineError::SchemaMismatch {
                what: "scaler input",
                expected: self.mean.len(),
                actual: row.len(),
            });
        }

        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================
