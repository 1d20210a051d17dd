//! Feature vector construction for the yield model

use crate::models::PredictionRequest;

/// Number of features expected by the model
pub const NUM_FEATURES: usize = 5;

/// Placeholder codes for state, crop, season and rainfall category.
///
/// These are stand-ins, not an encoding of the request strings: every
/// request gets the same four codes.
const PLACEHOLDER_CODES: [f64; 4] = [1.0, 2.0, 3.0, 4.0];

/// Ordered model input: `[state, crop, season, rainfall_category, area]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; NUM_FEATURES]);

impl FeatureVector {
    pub fn from_request(req: &PredictionRequest) -> Self {
        let [state, crop, season, rainfall] = PLACEHOLDER_CODES;
        Self([state, crop, season, rainfall, req.area])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn area(&self) -> f64 {
        self.0[NUM_FEATURES - 1]
    }

    /// Values as `f32`, the element type ONNX regressors take
    pub fn to_f32(&self) -> Vec<f32> {
        self.0.iter().map(|&x| x as f32).collect()
    }
}
