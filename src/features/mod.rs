//! Features Module - Schema, Input & Validation
//!
//! - `schema` - canonical ordered feature layout (the single source of truth)
//! - `input` - caller-facing named feature mapping
//! - `validate` - ordered-vector resolution, defaulting policy, imputation

pub mod schema;
pub mod input;
pub mod validate;

// Re-export common types
pub use schema::{FEATURE_COUNT, FEATURE_LAYOUT, SCHEMA_VERSION, SchemaInfo};
pub use input::FeatureInput;
pub use validate::ValidationPolicy;
