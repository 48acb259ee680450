//! Score Mapper - class label to base comfort score
//!
//! Deterministic mapping from class name to a base score in [0,1], computed
//! once per label set at bundle construction. The expected score over the
//! full probability distribution smooths out classifier boundary noise
//! compared to scoring the argmax class alone.

/// Base score table for a fixed label set.
#[derive(Debug, Clone)]
pub struct ScoreMapper {
    base_scores: Vec<f32>,
}

impl ScoreMapper {
    /// Compute the base score table for an ordered label set.
    ///
    /// Name matching is case-insensitive substring with fixed precedence:
    /// neutral, then slightly, then warm, then hot. Unmatched labels fall
    /// back to their ordinal position over (count - 1), or 0.0 for a
    /// single-class set.
    pub fn for_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let count = labels.len();
        let base_scores = labels
            .iter()
            .enumerate()
            .map(|(ordinal, name)| base_score_for(name.as_ref(), ordinal, count))
            .collect();
        Self { base_scores }
    }

    pub fn base_score(&self, index: usize) -> Option<f32> {
        self.base_scores.get(index).copied()
    }

    pub fn base_scores(&self) -> &[f32] {
        &self.base_scores
    }

    /// Probability-weighted expectation over all classes.
    pub fn expected_score(&self, probabilities: &[f32]) -> f32 {
        probabilities
            .iter()
            .zip(self.base_scores.iter())
            .map(|(p, s)| p * s)
            .sum()
    }
}

fn base_score_for(name: &str, ordinal: usize, count: usize) -> f32 {
    let lower = name.to_ascii_lowercase();
    if lower.contains("neutral") {
        0.0
    } else if lower.contains("slightly") {
        0.33
    } else if lower.contains("warm") {
        0.67
    } else if lower.contains("hot") {
        1.0
    } else if count > 1 {
        ordinal as f32 / (count - 1) as f32
    } else {
        0.0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_tiers() {
        let mapper = ScoreMapper::for_labels(&["Neutral", "Slightly Warm", "Warm", "Hot"]);
        assert_eq!(mapper.base_scores(), &[0.0, 0.33, 0.67, 1.0]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let mapper = ScoreMapper::for_labels(&["NEUTRAL", "hot"]);
        assert_eq!(mapper.base_scores(), &[0.0, 1.0]);
    }

    #[test]
    fn test_slightly_takes_precedence_over_warm() {
        let mapper = ScoreMapper::for_labels(&["slightly warm"]);
        assert_eq!(mapper.base_score(0), Some(0.33));
    }

    #[test]
    fn test_unmapped_labels_use_ordinal_fallback() {
        let mapper = ScoreMapper::for_labels(&["low", "medium", "high"]);
        assert_eq!(mapper.base_scores(), &[0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_single_unmapped_label_is_zero() {
        let mapper = ScoreMapper::for_labels(&["only"]);
        assert_eq!(mapper.base_score(0), Some(0.0));
    }

    #[test]
    fn test_expected_score_weights_full_distribution() {
        let mapper = ScoreMapper::for_labels(&["Neutral", "Slightly Warm", "Warm", "Hot"]);
        let score = mapper.expected_score(&[0.25, 0.25, 0.25, 0.25]);
        assert!((score - 0.5).abs() < 1e-6);

        // One-hot on argmax differs from the expectation under a spread
        let spread = mapper.expected_score(&[0.4, 0.3, 0.2, 0.1]);
        assert!((spread - (0.3 * 0.33 + 0.2 * 0.67 + 0.1)).abs() < 1e-6);
    }
}
