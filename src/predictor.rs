use crate::features::{FeatureVector, NUM_FEATURES};
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::Tensor,
};
use std::fmt::Display;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing::info;

/// Default ONNX input tensor name
pub const DEFAULT_INPUT_NAME: &str = "input";

/// Yield model errors
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("failed to load model from {path}: {message}")]
    ModelLoad { path: String, message: String },

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("model returned no output")]
    EmptyOutput,

    #[error("model returned a non-finite yield: {0}")]
    InvalidOutput(f64),
}

/// Yield-per-hectare regression capability
pub trait YieldModel: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;

    /// Backend name reported by `/health`
    fn name(&self) -> &str;

    /// Whether a trained artifact backs this model
    fn is_trained(&self) -> bool {
        false
    }
}

impl<F> YieldModel for F
where
    F: Fn(&FeatureVector) -> Result<f64, PredictionError> + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        self(features)
    }

    fn name(&self) -> &str {
        "custom"
    }
}

/// Run a model and reject outputs that cannot be multiplied into a total
pub fn checked_predict(
    model: &dyn YieldModel,
    features: &FeatureVector,
) -> Result<f64, PredictionError> {
    let value = model.predict(features)?;
    if !value.is_finite() {
        return Err(PredictionError::InvalidOutput(value));
    }
    Ok(value)
}

/// ONNX-based yield regressor
///
/// The session needs exclusive access to run, so concurrent requests take
/// turns on the mutex. Outputs do not depend on call order.
pub struct OnnxYieldModel {
    session: Mutex<Session>,
    input_name: String,
}

impl OnnxYieldModel {
    /// Load a single-output regression graph from `model_path`
    pub fn new<P: AsRef<Path>>(model_path: P, input_name: &str) -> Result<Self, PredictionError> {
        let model_path = model_path.as_ref();
        info!("Loading model: {:?}", model_path);

        let load_err = |e: &dyn Display| PredictionError::ModelLoad {
            path: model_path.display().to_string(),
            message: e.to_string(),
        };

        let session = Session::builder()
            .map_err(|e| load_err(&e))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| load_err(&e))?
            .commit_from_file(model_path)
            .map_err(|e| load_err(&e))?;

        info!("Loaded ONNX yield model");
        Ok(Self {
            session: Mutex::new(session),
            input_name: input_name.to_string(),
        })
    }
}

impl YieldModel for OnnxYieldModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let inference = |e: &dyn Display| PredictionError::Inference(e.to_string());

        let input_tensor = Tensor::from_array(([1usize, NUM_FEATURES], features.to_f32()))
            .map_err(|e| inference(&e))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| PredictionError::Inference("model session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| inference(&e))?;

        let (_, output_data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| inference(&e))?;

        output_data
            .first()
            .map(|&v| v as f64)
            .ok_or(PredictionError::EmptyOutput)
    }

    fn name(&self) -> &str {
        "onnx"
    }

    fn is_trained(&self) -> bool {
        true
    }
}

/// Fallback linear predictor (when the ONNX artifact is not available)
pub struct FallbackYieldModel {
    intercept: f64,
    coefficients: [f64; NUM_FEATURES],
}

impl FallbackYieldModel {
    pub fn new() -> Self {
        Self {
            intercept: 2.5,
            coefficients: [0.05, 0.10, 0.05, 0.10, 0.0],
        }
    }

    pub fn with_coefficients(intercept: f64, coefficients: [f64; NUM_FEATURES]) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }
}

impl Default for FallbackYieldModel {
    fn default() -> Self {
        Self::new()
    }
}

impl YieldModel for FallbackYieldModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let weighted: f64 = features
            .as_slice()
            .iter()
            .zip(self.coefficients.iter())
            .map(|(x, w)| x * w)
            .sum();
        Ok(self.intercept + weighted)
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
