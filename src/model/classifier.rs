//! Classifier runtime - ONNX Runtime integration
//!
//! The trained gradient-boosted classifier is exported to ONNX at training
//! time (zipmap disabled, so probabilities come back as a plain float
//! tensor). Pinning the export format means no post-load model patching:
//! the serialized graph runs as-is under the inference runtime.

use std::path::Path;
use std::sync::Mutex;

use ndarray::{Array2, ArrayView2};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{Value, ValueType};

use crate::error::{EngineError, EngineResult};

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Decision function over scaled feature rows.
///
/// Returns one probability row per input row; each row is a distribution
/// over the model's classes. Implementations must be reentrant so a loaded
/// bundle can be shared across threads.
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, x: ArrayView2<'_, f32>) -> EngineResult<Array2<f32>>;

    /// Expected input width, when the runtime can report it.
    fn n_features(&self) -> Option<usize> {
        None
    }

    /// Number of output classes, when the runtime can report it.
    fn n_classes(&self) -> Option<usize> {
        None
    }
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// Name of the probability output in the pinned export format.
const PROBABILITY_OUTPUT: &str = "probabilities";

pub struct OnnxClassifier {
    // ort sessions take &mut self to run
    session: Mutex<Session>,
    probability_output: String,
    n_features: Option<usize>,
    n_classes: Option<usize>,
}

impl OnnxClassifier {
    /// Load a serialized classifier graph from disk.
    pub fn load(model_path: &Path) -> EngineResult<Self> {
        log::info!("Loading ONNX classifier from: {}", model_path.display());

        let session = Session::builder()
            .map_err(|e| corrupt(format!("failed to create session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| corrupt(format!("failed to set optimization: {e}")))?
            .commit_from_file(model_path)
            .map_err(|e| corrupt(format!("failed to load model: {e}")))?;

        // Exports carry [label, probabilities]; prefer the probability output
        // by name, fall back to the last output for single-output graphs.
        let probability_output = session
            .outputs
            .iter()
            .find(|o| o.name == PROBABILITY_OUTPUT)
            .or_else(|| session.outputs.last())
            .map(|o| o.name.clone())
            .ok_or_else(|| corrupt("model defines no outputs".to_string()))?;

        // Graph metadata gives the static input width and class count up
        // front, so a bundle whose sidecars disagree with the model is
        // rejected at load instead of at first predict. Dynamic axes stay
        // unknown.
        let n_features = session
            .inputs
            .first()
            .and_then(|i| trailing_dim(&i.input_type));
        let n_classes = session
            .outputs
            .iter()
            .find(|o| o.name == probability_output)
            .and_then(|o| trailing_dim(&o.output_type));

        log::info!(
            "ONNX classifier loaded, probability output '{}', input width {:?}, classes {:?}",
            probability_output,
            n_features,
            n_classes
        );

        Ok(Self {
            session: Mutex::new(session),
            probability_output,
            n_features,
            n_classes,
        })
    }
}

/// Static size of a tensor's trailing axis, `None` for non-tensor values
/// and for dynamic axes (reported as non-positive dimensions).
fn trailing_dim(value_type: &ValueType) -> Option<usize> {
    match value_type {
        ValueType::Tensor { shape, .. } => shape
            .last()
            .copied()
            .and_then(|d| usize::try_from(d).ok())
            .filter(|&d| d > 0),
        _ => None,
    }
}

fn corrupt(reason: String) -> EngineError {
    EngineError::ArtifactCorrupt {
        artifact: "classifier",
        reason,
    }
}

impl Classifier for OnnxClassifier {
    fn predict_proba(&self, x: ArrayView2<'_, f32>) -> EngineResult<Array2<f32>> {
        let rows = x.nrows();
        if rows == 0 {
            return Err(EngineError::InferenceFailure("empty input batch".to_string()));
        }

        let input_tensor = Value::from_array(x.to_owned())
            .map_err(|e| EngineError::InferenceFailure(format!("tensor error: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| EngineError::InferenceFailure("classifier session poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| EngineError::InferenceFailure(format!("inference failed: {e}")))?;

        let output = outputs
            .get(&self.probability_output)
            .ok_or_else(|| EngineError::InferenceFailure("no probability output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| EngineError::InferenceFailure(format!("extract error: {e}")))?;

        let data = output_tensor.1;
        if data.is_empty() || data.len() % rows != 0 {
            return Err(EngineError::InferenceFailure(format!(
                "probability tensor has {} values for {} rows",
                data.len(),
                rows
            )));
        }

        let classes = data.len() / rows;
        Array2::from_shape_vec((rows, classes), data.to_vec())
            .map_err(|e| EngineError::InferenceFailure(format!("shape error: {e}")))
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn n_classes(&self) -> Option<usize> {
        self.n_classes
    }
}
