//! Comfort level, risk assessment & recommendations
//!
//! Two independently-thresholded scales over the same final score. They
//! answer different questions - subjective comfort vs. safety risk - and
//! must not be unified. Recommendations follow the comfort bands, which are
//! the canonical threshold function for level derivation.

use serde::{Deserialize, Serialize};

// ============================================================================
// COMFORT LEVEL
// ============================================================================

/// Subjective comfort bands over the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComfortLevel {
    Comfortable,
    #[serde(rename = "Slightly Uncomfortable")]
    SlightlyUncomfortable,
    Uncomfortable,
    #[serde(rename = "Very Uncomfortable")]
    VeryUncomfortable,
}

impl ComfortLevel {
    /// [0, 0.25) / [0.25, 0.5) / [0.5, 0.75) / [0.75, 1]
    pub fn from_score(score: f32) -> Self {
        let score = score.clamp(0.0, 1.0);
        if score < 0.25 {
            ComfortLevel::Comfortable
        } else if score < 0.5 {
            ComfortLevel::SlightlyUncomfortable
        } else if score < 0.75 {
            ComfortLevel::Uncomfortable
        } else {
            ComfortLevel::VeryUncomfortable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComfortLevel::Comfortable => "Comfortable",
            ComfortLevel::SlightlyUncomfortable => "Slightly Uncomfortable",
            ComfortLevel::Uncomfortable => "Uncomfortable",
            ComfortLevel::VeryUncomfortable => "Very Uncomfortable",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            ComfortLevel::Comfortable => 0,
            ComfortLevel::SlightlyUncomfortable => 1,
            ComfortLevel::Uncomfortable => 2,
            ComfortLevel::VeryUncomfortable => 3,
        }
    }
}

impl std::fmt::Display for ComfortLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RISK ASSESSMENT
// ============================================================================

/// Safety-risk bands over the final score.
/// Deliberately different cut points from `ComfortLevel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskAssessment {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskAssessment {
    /// [0, 0.3) / [0.3, 0.6) / [0.6, 0.8) / [0.8, 1]
    pub fn from_score(score: f32) -> Self {
        let score = score.clamp(0.0, 1.0);
        if score < 0.3 {
            RiskAssessment::Low
        } else if score < 0.6 {
            RiskAssessment::Moderate
        } else if score < 0.8 {
            RiskAssessment::High
        } else {
            RiskAssessment::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskAssessment::Low => "Low",
            RiskAssessment::Moderate => "Moderate",
            RiskAssessment::High => "High",
            RiskAssessment::Critical => "Critical",
        }
    }

    pub fn severity_level(&self) -> u8 {
        match self {
            RiskAssessment::Low => 0,
            RiskAssessment::Moderate => 1,
            RiskAssessment::High => 2,
            RiskAssessment::Critical => 3,
        }
    }
}

impl std::fmt::Display for RiskAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

/// Ordered action strings for a comfort band. Pure lookup table.
pub fn recommendations(level: ComfortLevel) -> Vec<String> {
    let actions: &[&str] = match level {
        ComfortLevel::Comfortable => &[
            "Continue current activity",
            "Monitor comfort levels periodically",
        ],
        ComfortLevel::SlightlyUncomfortable => &[
            "Apply cooling measures",
            "Increase hydration",
        ],
        ComfortLevel::Uncomfortable => &[
            "Take a cooling break",
            "Reduce activity intensity",
        ],
        ComfortLevel::VeryUncomfortable => &[
            "Apply immediate cooling",
            "Stop strenuous activity",
            "Seek medical attention if symptoms persist",
        ],
    };
    actions.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// TESTS
// ============================================================================
