//! HeatGuard Core - Thermal Comfort Prediction Engine
//!
//! Real-time thermal-comfort / heat-exposure risk predictions from
//! wearable-sensor and environmental features, served by a pre-trained
//! gradient-boosted classifier.
//!
//! ## Architecture
//! - `features/` - canonical schema, caller input, validation & defaulting
//! - `model/` - bundle loader, scaler, label encoder, classifier runtime
//! - `scoring/` - score mapping, conservative bias, comfort/risk levels
//! - `engine` - single-vector prediction pipeline
//! - `batch` - ordered batch prediction with per-item failure isolation
//!
//! The bundle is loaded once at startup and is read-only afterwards; every
//! prediction is a pure function of (bundle, input, bias). HTTP serving,
//! persistence and model training live outside this crate.
//!
//! ```no_run
//! use std::sync::Arc;
//! use heatguard_core::{FeatureInput, ModelBundle, PredictionEngine};
//!
//! # fn main() -> Result<(), heatguard_core::EngineError> {
//! let bundle = Arc::new(ModelBundle::load("models/comfort_v1".as_ref())?);
//! let engine = PredictionEngine::new(bundle);
//!
//! let input = FeatureInput::template()
//!     .with("Temperature", 31.0)
//!     .with("Humidity", 70.0)
//!     .with("hrv_mean_hr", 96.0);
//! let result = engine.predict(&input)?;
//! println!("{} ({})", result.comfort_level, result.risk_assessment);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod features;
pub mod model;
pub mod scoring;
pub mod engine;
pub mod batch;

// Re-export the service surface
pub use error::{EngineError, EngineResult};
pub use features::{FeatureInput, ValidationPolicy, FEATURE_COUNT};
pub use model::ModelBundle;
pub use scoring::{ComfortLevel, RiskAssessment, DEFAULT_CONSERVATIVE_BIAS};
pub use engine::{PredictionEngine, PredictionResult};
pub use batch::{BatchItem, BatchRunner, BatchSummary};
