//! Label encoder - bijection between class index and class name
//!
//! Exported at training time as `label_encoder.json`. Both the canonical
//! `{"classes": [...]}` object and a bare array are accepted; the bare form
//! is what older export scripts wrote.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};

/// Ordered class names; index i is the classifier's class i.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> EngineResult<Self> {
        if classes.is_empty() {
            return Err(EngineError::ArtifactCorrupt {
                artifact: "label_encoder",
                reason: "empty class list".to_string(),
            });
        }

        let mut seen = classes.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != classes.len() {
            return Err(EngineError::ArtifactCorrupt {
                artifact: "label_encoder",
                reason: "duplicate class names".to_string(),
            });
        }

        Ok(Self { classes })
    }

    /// Parse from the `label_encoder.json` artifact body.
    pub fn from_json(body: &str) -> EngineResult<Self> {
        let value: Value = serde_json::from_str(body).map_err(|e| EngineError::ArtifactCorrupt {
            artifact: "label_encoder",
            reason: e.to_string(),
        })?;

        let raw = match &value {
            Value::Array(_) => value.clone(),
            Value::Object(map) => map.get("classes").cloned().ok_or_else(|| {
                EngineError::ArtifactCorrupt {
                    artifact: "label_encoder",
                    reason: "object without 'classes' key".to_string(),
                }
            })?,
            _ => {
                return Err(EngineError::ArtifactCorrupt {
                    artifact: "label_encoder",
                    reason: "expected an array or {\"classes\": [...]}".to_string(),
                })
            }
        };

        let classes: Vec<String> =
            serde_json::from_value(raw).map_err(|e| EngineError::ArtifactCorrupt {
                artifact: "label_encoder",
                reason: e.to_string(),
            })?;
        Self::new(classes)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(|s| s.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == name)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_bijection() {
        let enc = LabelEncoder::new(names(&["Neutral", "Warm", "Hot"])).unwrap();
        assert_eq!(enc.class_count(), 3);
        assert_eq!(enc.name_of(1), Some("Warm"));
        assert_eq!(enc.index_of("Hot"), Some(2));
        assert_eq!(enc.name_of(3), None);
        assert_eq!(enc.index_of("Cold"), None);
    }

    #[test]
    fn test_empty_is_corrupt() {
        let err = LabelEncoder::new(vec![]).unwrap_err();
        assert!(matches!(err, EngineError::ArtifactCorrupt { artifact: "label_encoder", .. }));
    }

    #[test]
    fn test_duplicates_are_corrupt() {
        let err = LabelEncoder::new(names(&["Warm", "Warm"])).unwrap_err();
        assert!(matches!(err, EngineError::ArtifactCorrupt { .. }));
    }

    #[test]
    fn test_from_json_object_form() {
        let enc = LabelEncoder::from_json(r#"{"classes": ["Neutral", "Hot"]}"#).unwrap();
        assert_eq!(enc.classes(), &["Neutral", "Hot"]);
    }

    #[test]
    fn test_from_json_bare_array_form() {
        let enc = LabelEncoder::from_json(r#"["Neutral", "Hot"]"#).unwrap();
        assert_eq!(enc.classes(), &["Neutral", "Hot"]);
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        assert!(LabelEncoder::from_json("42").is_err());
        assert!(LabelEncoder::from_json(r#"{"labels": []}"#).is_err());
    }
}
