//! Model Module - Bundle, Scaler, Labels & Classifier Runtime
//!
//! The bundle is the persisted-state boundary: four artifacts trained
//! elsewhere, loaded together once at startup, read-only afterwards.

pub mod scaler;
pub mod labels;
pub mod classifier;
pub mod bundle;

// Re-export common types
pub use scaler::StandardScaler;
pub use labels::LabelEncoder;
pub use classifier::{Classifier, OnnxClassifier};
pub use bundle::ModelBundle;
