//! Feature validation and defaulting
//!
//! Turns a caller-supplied `FeatureInput` into the complete, ordered numeric
//! vector the model expects. Column order follows the bundle's column list
//! exactly; reordering or omission is a correctness bug, because the scaler
//! and classifier are order-sensitive.

use crate::error::{EngineError, EngineResult};
use super::input::FeatureInput;

// ============================================================================
// POLICY
// ============================================================================

/// How absent required columns are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Fail with `MissingFeatures` naming every absent column.
    /// The contract for externally-facing entry points.
    #[default]
    Strict,
    /// Silently default absent columns to 0.0.
    /// Acceptable only for interactive/demo callers.
    Lenient,
}

// ============================================================================
// RESOLUTION
// ============================================================================

/// Resolve an input into a vector ordered exactly like `columns`.
///
/// Non-finite values (NaN, infinities) that survive to this point fall back
/// to 0.0 - the degenerate single-row imputation case. Batch callers should
/// run `mean_impute` first so NaNs get the column mean instead.
pub fn resolve(
    input: &FeatureInput,
    columns: &[String],
    policy: ValidationPolicy,
) -> EngineResult<Vec<f32>> {
    if policy == ValidationPolicy::Strict {
        let missing: Vec<String> = columns
            .iter()
            .filter(|name| !input.contains(name))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(EngineError::MissingFeatures { features: missing });
        }
    }

    let row = columns
        .iter()
        .map(|name| {
            let value = match input.get(name) {
                Some(v) => v,
                None => {
                    log::debug!("feature '{}' absent, defaulting to 0.0", name);
                    0.0
                }
            };
            if value.is_finite() {
                value as f32
            } else {
                log::debug!("feature '{}' non-finite, defaulting to 0.0", name);
                0.0
            }
        })
        .collect();

    Ok(row)
}

// ============================================================================
// BATCH IMPUTATION
// ============================================================================

/// Replace NaN values with the column's mean across the batch.
///
/// The mean is taken over the finite values present for that column; a
/// column with no finite value anywhere imputes to 0.0. Absent columns are
/// left absent - missing-column policy is `resolve`'s concern.
pub fn mean_impute(inputs: &[FeatureInput], columns: &[String]) -> Vec<FeatureInput> {
    let mut patched: Vec<FeatureInput> = inputs.to_vec();

    for name in columns {
        let mut sum = 0.0f64;
        let mut count = 0usize;
        let mut has_non_finite = false;

        for input in inputs {
            match input.get(name) {
                Some(v) if v.is_finite() => {
                    sum += v;
                    count += 1;
                }
                Some(_) => has_non_finite = true,
                None => {}
            }
        }

        if !has_non_finite {
            continue;
        }

        let fill = if count > 0 { sum / count as f64 } else { 0.0 };
        for input in &mut patched {
            if matches!(input.get(name), Some(v) if !v.is_finite()) {
                input.set(name.clone(), fill);
            }
        }
    }

    patched
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_orders_by_columns() {
        let cols = columns(&["Gender", "Age", "Temperature"]);
        let input = FeatureInput::new()
            .with("Temperature", 28.5)
            .with("Gender", 1.0)
            .with("Age", 30.0);

        let row = resolve(&input, &cols, ValidationPolicy::Strict).unwrap();
        assert_eq!(row, vec![1.0, 30.0, 28.5]);
    }

    #[test]
    fn test_strict_reports_every_missing_column() {
        let cols = columns(&["Gender", "Age", "Temperature", "Humidity"]);
        let input = FeatureInput::new().with("Age", 30.0);

        let err = resolve(&input, &cols, ValidationPolicy::Strict).unwrap_err();
        match err {
            EngineError::MissingFeatures { features } => {
                assert_eq!(features, vec!["Gender", "Temperature", "Humidity"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lenient_defaults_missing_to_zero() {
        let cols = columns(&["Gender", "Age", "Temperature"]);
        let input = FeatureInput::new().with("Age", 30.0);

        let row = resolve(&input, &cols, ValidationPolicy::Lenient).unwrap();
        assert_eq!(row, vec![0.0, 30.0, 0.0]);
    }

    #[test]
    fn test_single_row_nan_falls_back_to_zero() {
        let cols = columns(&["Age"]);
        let input = FeatureInput::new().with("Age", f64::NAN);

        let row = resolve(&input, &cols, ValidationPolicy::Strict).unwrap();
        assert_eq!(row, vec![0.0]);
    }

    #[test]
    fn test_unknown_extra_keys_are_ignored() {
        let cols = columns(&["Age"]);
        let input = FeatureInput::new()
            .with("Age", 30.0)
            .with("shoe_size", 42.0);

        let row = resolve(&input, &cols, ValidationPolicy::Strict).unwrap();
        assert_eq!(row, vec![30.0]);
    }

    #[test]
    fn test_mean_impute_uses_column_mean() {
        let cols = columns(&["hrv_mean_hr"]);
        let inputs = vec![
            FeatureInput::new().with("hrv_mean_hr", 70.0),
            FeatureInput::new().with("hrv_mean_hr", f64::NAN),
            FeatureInput::new().with("hrv_mean_hr", 90.0),
        ];

        let patched = mean_impute(&inputs, &cols);
        assert_eq!(patched[1].get("hrv_mean_hr"), Some(80.0));
        // Finite values untouched
        assert_eq!(patched[0].get("hrv_mean_hr"), Some(70.0));
        assert_eq!(patched[2].get("hrv_mean_hr"), Some(90.0));
    }

    #[test]
    fn test_mean_impute_all_nan_column_falls_back_to_zero() {
        let cols = columns(&["hrv_rmssd"]);
        let inputs = vec![
            FeatureInput::new().with("hrv_rmssd", f64::NAN),
            FeatureInput::new().with("hrv_rmssd", f64::NAN),
        ];

        let patched = mean_impute(&inputs, &cols);
        assert_eq!(patched[0].get("hrv_rmssd"), Some(0.0));
        assert_eq!(patched[1].get("hrv_rmssd"), Some(0.0));
    }

    #[test]
    fn test_mean_impute_leaves_absent_columns_absent() {
        let cols = columns(&["hrv_sdnn"]);
        let inputs = vec![
            FeatureInput::new().with("hrv_sdnn", f64::NAN),
            FeatureInput::new(),
        ];

        let patched = mean_impute(&inputs, &cols);
        assert_eq!(patched[0].get("hrv_sdnn"), Some(0.0));
        assert!(!patched[1].contains("hrv_sdnn"));
    }
}
