//! Conservative bias - deliberate over-caution
//!
//! In a worker-safety context a missed heat risk costs more than a false
//! alarm, so the served score is biased upward before thresholding.

use serde::{Deserialize, Serialize};

/// Process-level default additive bias.
pub const DEFAULT_CONSERVATIVE_BIAS: f32 = 0.15;

/// Additive bias applied to the probability-weighted score, clamped to [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConservativeBiasPolicy {
    pub bias: f32,
}

impl ConservativeBiasPolicy {
    pub fn new(bias: f32) -> Self {
        Self { bias }
    }

    pub fn apply(&self, standard_score: f32) -> f32 {
        (standard_score + self.bias).clamp(0.0, 1.0)
    }
}

impl Default for ConservativeBiasPolicy {
    fn default() -> Self {
        Self {
            bias: DEFAULT_CONSERVATIVE_BIAS,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
