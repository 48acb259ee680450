//! Batch Runner - per-item isolated batch prediction
//!
//! Applies the engine across an ordered collection of inputs. One item's
//! failure never aborts its siblings: every input produces a tagged outcome,
//! output length equals input length, and output order follows input order.

use serde::Serialize;

use crate::engine::{PredictionEngine, PredictionResult};
use crate::error::EngineError;
use crate::features::{validate, FeatureInput};

// ============================================================================
// BATCH ITEMS
// ============================================================================

/// Outcome for one batch position.
#[derive(Debug)]
pub struct BatchItem {
    pub index: usize,
    pub outcome: Result<PredictionResult, EngineError>,
}

/// Aggregate view over a finished batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Mean final score over successful items, when any succeeded.
    pub mean_final_score: Option<f32>,
}

// ============================================================================
// RUNNER
// ============================================================================

#[derive(Debug, Clone)]
pub struct BatchRunner {
    engine: PredictionEngine,
}

impl BatchRunner {
    pub fn new(engine: PredictionEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    /// Predict every input with the engine defaults (bias enabled).
    pub fn predict_batch(&self, inputs: &[FeatureInput]) -> Vec<BatchItem> {
        self.predict_batch_with(inputs, true, None)
    }

    /// Predict every input, with per-batch bias control.
    ///
    /// NaN values are mean-imputed per column across the batch before any
    /// item is predicted; per-item failures are tagged in place.
    pub fn predict_batch_with(
        &self,
        inputs: &[FeatureInput],
        use_conservative_bias: bool,
        bias_override: Option<f32>,
    ) -> Vec<BatchItem> {
        let imputed = validate::mean_impute(inputs, self.engine.bundle().feature_columns());

        imputed
            .iter()
            .enumerate()
            .map(|(index, input)| {
                let outcome = self
                    .engine
                    .predict_with(input, use_conservative_bias, bias_override);
                if let Err(err) = &outcome {
                    log::warn!("batch item {index} failed: {err}");
                }
                BatchItem { index, outcome }
            })
            .collect()
    }

    /// Summarize a finished batch.
    pub fn summary(items: &[BatchItem]) -> BatchSummary {
        let succeeded = items.iter().filter(|i| i.outcome.is_ok()).count();
        let failed = items.len() - succeeded;
        let mean_final_score = if succeeded > 0 {
            let sum: f32 = items
                .iter()
                .filter_map(|i| i.outcome.as_ref().ok())
                .map(|r| r.final_score)
                .sum();
            Some(sum / succeeded as f32)
        } else {
            None
        };

        BatchSummary {
            total: items.len(),
            succeeded,
            failed,
            mean_final_score,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
