//! Feature Input - named numeric features as supplied by the caller
//!
//! A `FeatureInput` is the raw request shape: a flat mapping from feature
//! name to number. Unknown extra keys are carried but ignored downstream;
//! validation against the bundle's column list happens in `validate`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use super::schema;

/// Named numeric input features for one prediction.
///
/// Backed by a `BTreeMap` so iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureInput {
    values: BTreeMap<String, f64>,
}

impl FeatureInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }

    /// Build an input from a JSON object of `name -> number`.
    ///
    /// Integers and floats are both accepted; booleans, strings, nulls and
    /// nested values are rejected with `InvalidFeatureType`.
    pub fn from_json(value: &Value) -> EngineResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| EngineError::InvalidFeatureType {
                feature: "<input>".to_string(),
                found: json_type_name(value).to_string(),
            })?;

        let mut values = BTreeMap::new();
        for (name, raw) in obj {
            let number = raw
                .as_f64()
                .ok_or_else(|| EngineError::InvalidFeatureType {
                    feature: name.clone(),
                    found: json_type_name(raw).to_string(),
                })?;
            values.insert(name.clone(), number);
        }
        Ok(Self { values })
    }

    /// Default-valued input covering the full canonical schema.
    ///
    /// Gender=1, Age=25, Temperature=25.0, Humidity=50.0, all `hrv_*` = 0.0.
    /// Intended for client scaffolding and tests.
    pub fn template() -> Self {
        let values = schema::FEATURE_LAYOUT
            .iter()
            .map(|&name| (name.to_string(), schema::default_value(name)))
            .collect();
        Self { values }
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Builder-style setter for test and scaffolding ergonomics.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_accepts_ints_and_floats() {
        let input = FeatureInput::from_json(&json!({
            "Gender": 1,
            "Temperature": 28.5,
        }))
        .unwrap();

        assert_eq!(input.get("Gender"), Some(1.0));
        assert_eq!(input.get("Temperature"), Some(28.5));
    }

    #[test]
    fn test_from_json_rejects_non_numeric() {
        let err = FeatureInput::from_json(&json!({
            "Temperature": "hot",
        }))
        .unwrap_err();

        match err {
            EngineError::InvalidFeatureType { feature, found } => {
                assert_eq!(feature, "Temperature");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_json_rejects_non_object_root() {
        let err = FeatureInput::from_json(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidFeatureType { .. }));
    }

    #[test]
    fn test_template_matches_schema_exactly() {
        let template = FeatureInput::template();
        assert_eq!(template.len(), schema::FEATURE_COUNT);
        for &name in schema::FEATURE_LAYOUT {
            assert!(template.contains(name), "template missing {name}");
        }

        assert_eq!(template.get("Gender"), Some(1.0));
        assert_eq!(template.get("Age"), Some(25.0));
        assert_eq!(template.get("Temperature"), Some(25.0));
        assert_eq!(template.get("Humidity"), Some(50.0));
        assert_eq!(template.get("hrv_mean_hr"), Some(0.0));
    }

    #[test]
    fn test_set_and_remove() {
        let mut input = FeatureInput::new();
        input.set("Age", 30.0);
        assert_eq!(input.get("Age"), Some(30.0));
        assert_eq!(input.remove("Age"), Some(30.0));
        assert!(input.is_empty());
    }

    #[test]
    fn test_serde_round_trip_is_flat_map() {
        let input = FeatureInput::new().with("Age", 30.0).with("Gender", 1.0);
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, json!({"Age": 30.0, "Gender": 1.0}));
    }
}
