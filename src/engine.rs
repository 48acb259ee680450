//! Prediction Engine - single-vector inference pipeline
//!
//! Orchestrates validation → scaling → inference → scoring → level
//! derivation → recommendations for one feature vector. The engine owns no
//! mutable state: everything is a pure function of the immutable bundle,
//! the input and the bias, so one engine is safely shared across threads.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::features::{validate, FeatureInput, ValidationPolicy};
use crate::model::ModelBundle;
use crate::scoring::{recommendations, ComfortLevel, ConservativeBiasPolicy, RiskAssessment, ScoreMapper};

// ============================================================================
// PREDICTION RESULT
// ============================================================================

/// One calibrated, risk-biased, human-interpretable prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_class: String,
    #[serde(rename = "comfort_score_standard")]
    pub standard_score: f32,
    #[serde(rename = "comfort_score_conservative")]
    pub conservative_score: f32,
    #[serde(rename = "comfort_score_final")]
    pub final_score: f32,
    pub comfort_level: ComfortLevel,
    /// Maximum class probability.
    pub confidence: f32,
    #[serde(rename = "conservative_bias")]
    pub bias_used: f32,
    pub class_probabilities: BTreeMap<String, f32>,
    pub risk_assessment: RiskAssessment,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// ENGINE
// ============================================================================

/// Inference pipeline over one immutable bundle.
#[derive(Debug, Clone)]
pub struct PredictionEngine {
    bundle: Arc<ModelBundle>,
    policy: ValidationPolicy,
    bias: ConservativeBiasPolicy,
    mapper: ScoreMapper,
}

impl PredictionEngine {
    /// Build an engine over a loaded bundle. The score table is computed
    /// once here, per the bundle's label set.
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        let mapper = ScoreMapper::for_labels(bundle.class_names());
        Self {
            bundle,
            policy: ValidationPolicy::Strict,
            bias: ConservativeBiasPolicy::default(),
            mapper,
        }
    }

    /// Override the validation policy (strict is the default contract).
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the engine-level default bias.
    pub fn with_bias(mut self, bias: f32) -> Self {
        self.bias = ConservativeBiasPolicy::new(bias);
        self
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn default_bias(&self) -> f32 {
        self.bias.bias
    }

    /// Predict with the conservative bias enabled and the engine default.
    pub fn predict(&self, input: &FeatureInput) -> EngineResult<PredictionResult> {
        self.predict_with(input, true, None)
    }

    /// Full-control prediction: toggle the conservative bias and optionally
    /// override its magnitude for this call.
    pub fn predict_with(
        &self,
        input: &FeatureInput,
        use_conservative_bias: bool,
        bias_override: Option<f32>,
    ) -> EngineResult<PredictionResult> {
        // 1. Validate/complete - fails before touching the model
        let row = validate::resolve(input, self.bundle.feature_columns(), self.policy)?;

        // 2. Scale into model space
        let scaled = self.bundle.scaler().transform(&row)?;
        let x = Array2::from_shape_vec((1, scaled.len()), scaled)
            .map_err(|e| EngineError::InferenceFailure(format!("input shape error: {e}")))?;

        // 3. Full probability distribution over all classes
        let proba = self.bundle.classifier().predict_proba(x.view())?;
        if proba.nrows() != 1 {
            return Err(EngineError::InferenceFailure(format!(
                "expected 1 probability row, got {}",
                proba.nrows()
            )));
        }
        let probs: Vec<f32> = proba.row(0).to_vec();
        if probs.len() != self.bundle.class_count() {
            return Err(EngineError::SchemaMismatch {
                what: "class probabilities",
                expected: self.bundle.class_count(),
                actual: probs.len(),
            });
        }

        let total: f32 = probs.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            log::warn!("class probabilities sum to {total}, expected 1.0");
        }

        // 4. Argmax class and confidence
        let predicted_index = probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let predicted_class = self
            .bundle
            .class_name(predicted_index)
            .ok_or_else(|| {
                EngineError::InferenceFailure("predicted class index out of range".to_string())
            })?
            .to_string();
        let confidence = probs[predicted_index];

        // 5-7. Scores
        let standard_score = self.mapper.expected_score(&probs);
        let bias = bias_override
            .map(ConservativeBiasPolicy::new)
            .unwrap_or(self.bias);
        let conservative_score = bias.apply(standard_score);
        let final_score = if use_conservative_bias {
            conservative_score
        } else {
            standard_score
        };

        // 8-10. Levels and recommendations
        let comfort_level = ComfortLevel::from_score(final_score);
        let risk_assessment = RiskAssessment::from_score(final_score);
        let recommendations = recommendations(comfort_level);

        log::debug!(
            "predicted '{}' standard={:.3} final={:.3} level={} risk={}",
            predicted_class,
            standard_score,
            final_score,
            comfort_level,
            risk_assessment
        );

        let class_probabilities = self
            .bundle
            .class_names()
            .iter()
            .cloned()
            .zip(probs.iter().copied())
            .collect();

        Ok(PredictionResult {
            predicted_class,
            standard_score,
            conservative_score,
            final_score,
            comfort_level,
            confidence,
            bias_used: bias.bias,
            class_probabilities,
            risk_assessment,
            recommendations,
            timestamp: Utc::now(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
