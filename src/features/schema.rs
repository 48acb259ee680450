//! Feature Schema - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment SCHEMA_VERSION
//! 2. Change order → increment SCHEMA_VERSION
//! 3. Remove feature → increment SCHEMA_VERSION
//!
//! The scaler and classifier are order-sensitive: the vector handed to the
//! model must follow this layout exactly. The bundle records its own column
//! list at training time; `schema_hash()` lets callers detect drift between
//! a deployed model and this crate's schema.

use std::collections::HashMap;

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// SCHEMA VERSION
// ============================================================================

/// Current feature schema version
/// MUST be incremented when the layout changes
pub const SCHEMA_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in the exact order they appear in the model input vector.
/// This is the SINGLE SOURCE OF TRUTH for the feature layout.
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Demographic / environmental (0-3) ===
    "Gender",      // 0: 0 = female, 1 = male
    "Age",         // 1: Years
    "Temperature", // 2: Ambient temperature, Celsius
    "Humidity",    // 3: Relative humidity, percent 0-100

    // === HRV time-domain (4-20) ===
    "hrv_num_ibis",   // 4: Number of inter-beat intervals in the window
    "hrv_mean_nni",   // 5: Mean NN interval (ms)
    "hrv_median_nni", // 6: Median NN interval (ms)
    "hrv_range_nni",  // 7: Max - min NN interval (ms)
    "hrv_sdsd",       // 8: Std of successive NN differences
    "hrv_rmssd",      // 9: Root mean square of successive differences
    "hrv_nni_50",     // 10: Count of successive differences > 50ms
    "hrv_pnni_50",    // 11: Proportion of nni_50 (percent)
    "hrv_nni_20",     // 12: Count of successive differences > 20ms
    "hrv_pnni_20",    // 13: Proportion of nni_20 (percent)
    "hrv_cvsd",       // 14: Coefficient of variation of successive differences
    "hrv_sdnn",       // 15: Std of NN intervals
    "hrv_cvnni",      // 16: Coefficient of variation of NN intervals
    "hrv_mean_hr",    // 17: Mean heart rate (bpm)
    "hrv_min_hr",     // 18: Minimum heart rate (bpm)
    "hrv_max_hr",     // 19: Maximum heart rate (bpm)
    "hrv_std_hr",     // 20: Std of heart rate

    // === HRV frequency-domain (21-27) ===
    "hrv_total_power", // 21: Total spectral power
    "hrv_vlf",         // 22: Very-low-frequency band power
    "hrv_lf",          // 23: Low-frequency band power
    "hrv_hf",          // 24: High-frequency band power
    "hrv_lf_hf_ratio", // 25: LF/HF balance
    "hrv_lfnu",        // 26: LF power, normalized units
    "hrv_hfnu",        // 27: HF power, normalized units

    // === HRV nonlinear / geometric (28-33) ===
    "hrv_SD1",          // 28: Poincare plot short-axis
    "hrv_SD2",          // 29: Poincare plot long-axis
    "hrv_SD2SD1",       // 30: SD2/SD1 ratio
    "hrv_CSI",          // 31: Cardiac sympathetic index
    "hrv_CVI",          // 32: Cardiac vagal index
    "hrv_CSI_Modified", // 33: Modified CSI

    // === HRV statistical (34-55) ===
    "hrv_mean",           // 34: Mean of the raw signal window
    "hrv_std",            // 35: Std of the raw signal window
    "hrv_min",            // 36: Window minimum
    "hrv_max",            // 37: Window maximum
    "hrv_ptp",            // 38: Peak-to-peak amplitude
    "hrv_sum",            // 39: Window sum
    "hrv_energy",         // 40: Sum of squares
    "hrv_skewness",       // 41: Third moment
    "hrv_kurtosis",       // 42: Fourth moment
    "hrv_peaks",          // 43: Peak count
    "hrv_rms",            // 44: Root mean square
    "hrv_lineintegral",   // 45: Line integral of the signal
    "hrv_n_above_mean",   // 46: Samples above window mean
    "hrv_n_below_mean",   // 47: Samples below window mean
    "hrv_n_sign_changes", // 48: Sign change count
    "hrv_iqr",            // 49: Interquartile range
    "hrv_iqr_5_95",       // 50: 5th-95th percentile range
    "hrv_pct_5",          // 51: 5th percentile
    "hrv_pct_95",         // 52: 95th percentile
    "hrv_entropy",        // 53: Shannon entropy
    "hrv_perm_entropy",   // 54: Permutation entropy
    "hrv_svd_entropy",    // 55: SVD entropy
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 56;

// ============================================================================
// TEMPLATE DEFAULTS
// ============================================================================

pub const DEFAULT_GENDER: f64 = 1.0;
pub const DEFAULT_AGE: f64 = 25.0;
pub const DEFAULT_TEMPERATURE: f64 = 25.0;
pub const DEFAULT_HUMIDITY: f64 = 50.0;

/// Default value for a feature in the scaffolding template.
/// All `hrv_*` features default to 0.0.
pub fn default_value(name: &str) -> f64 {
    match name {
        "Gender" => DEFAULT_GENDER,
        "Age" => DEFAULT_AGE,
        "Temperature" => DEFAULT_TEMPERATURE,
        "Humidity" => DEFAULT_HUMIDITY,
        _ => 0.0,
    }
}

// ============================================================================
// SCHEMA HASH
// ============================================================================

/// Compute CRC32 hash of the feature schema.
/// Used to detect schema drift between crate and deployed bundles.
pub fn compute_schema_hash() -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[SCHEMA_VERSION]);

    // Hash all feature names in order
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get schema hash (inputs are const, so the value is stable per build)
pub fn schema_hash() -> u32 {
    compute_schema_hash()
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

static INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    FEATURE_LAYOUT
        .iter()
        .enumerate()
        .map(|(i, &name)| (name, i))
        .collect()
});

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    INDEX.get(name).copied()
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// DRIFT DETECTION
// ============================================================================

/// Compare a bundle's column list against the crate schema.
///
/// Returns a description of the first divergence, or `None` when the columns
/// match the layout exactly. Drift is reportable, not fatal: a bundle trained
/// against a different layout is still served, on its own column order.
pub fn describe_drift(columns: &[String]) -> Option<String> {
    if columns.len() != FEATURE_COUNT {
        return Some(format!(
            "bundle has {} feature columns, schema v{} (hash {:08x}) has {}",
            columns.len(),
            SCHEMA_VERSION,
            schema_hash(),
            FEATURE_COUNT
        ));
    }

    if let Some(unknown) = columns.iter().find(|c| feature_index(c).is_none()) {
        return Some(format!(
            "bundle column '{}' is not in schema v{} (hash {:08x})",
            unknown,
            SCHEMA_VERSION,
            schema_hash()
        ));
    }

    (0..columns.len())
        .find(|&i| feature_name(i) != Some(columns[i].as_str()))
        .map(|i| {
            format!(
                "bundle column {} is '{}', schema v{} (hash {:08x}) has '{}' there",
                i,
                columns[i],
                SCHEMA_VERSION,
                schema_hash(),
                feature_name(i).unwrap_or("?")
            )
        })
}

// ============================================================================
// SCHEMA INFO
// ============================================================================

/// Complete schema information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl SchemaInfo {
    pub fn current() -> Self {
        Self {
            version: SCHEMA_VERSION,
            hash: schema_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for SchemaInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// TESTS
// ============================================================================
