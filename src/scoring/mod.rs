//! Scoring Module - Score Mapping, Bias & Level Derivation

pub mod mapper;
pub mod bias;
pub mod levels;

// Re-export common types
pub use mapper::ScoreMapper;
pub use bias::{ConservativeBiasPolicy, DEFAULT_CONSERVATIVE_BIAS};
pub use levels::{recommendations, ComfortLevel, RiskAssessment};
