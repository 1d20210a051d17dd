//! Crop Yield - yield prediction and farming report service
//!
//! This library provides:
//! - Yield-per-hectare prediction using an ONNX regression model
//! - Soil suitability checks against a static crop/soil table
//! - Farming report generation through the Gemini API
//! - The request pipeline shared by the HTTP server and the CLI
//!
//! # Example
//!
//! ```no_run
//! use crop_yield::predictor::FallbackYieldModel;
//! use crop_yield::report::OfflineReportGenerator;
//! use crop_yield::service::YieldReportService;
//! use crop_yield::soil::SoilSuitabilityTable;
//!
//! # async fn run() {
//! let service = YieldReportService::new(
//!     Box::new(FallbackYieldModel::new()),
//!     SoilSuitabilityTable::standard(),
//!     OfflineReportGenerator,
//! );
//!
//! let body = serde_json::json!({
//!     "state": "Punjab", "crop": "Wheat", "soil_type": "Loamy",
//!     "season": "Rabi", "rainfall_category": "Medium", "area": "10"
//! });
//! let response = service.handle_report_request(&body).await;
//! println!("{}", response);
//! # }
//! ```

pub mod config;
pub mod error;
pub mod features;
pub mod models;
pub mod predictor;
pub mod prompt;
pub mod report;
pub mod service;
pub mod soil;

// Re-export commonly used types
pub use error::AppError;
pub use features::FeatureVector;
pub use models::{ErrorResponse, PredictionRequest, PredictionResponse, PredictionResult};
pub use predictor::{FallbackYieldModel, OnnxYieldModel, YieldModel};
pub use report::{ReportBackend, ReportGenerator};
pub use service::{PreparedReport, YieldReportService};
pub use soil::{SoilSuitability, SoilSuitabilityTable};

use tracing::{info, warn};

/// Load the ONNX model, falling back to the linear model if it is unavailable
pub fn load_yield_model(config: &config::ServiceConfig) -> Box<dyn YieldModel> {
    info!("Loading ONNX model from {:?}", config.model_path);

    match OnnxYieldModel::new(&config.model_path, &config.model_input_name) {
        Ok(model) => {
            info!("ONNX model loaded successfully");
            Box::new(model)
        }
        Err(e) => {
            warn!("Failed to load ONNX model: {}. Using fallback predictor.", e);
            Box::new(FallbackYieldModel::new())
        }
    }
}

/// Build the service from configuration
pub fn build_service(
    config: &config::ServiceConfig,
) -> Result<YieldReportService<ReportBackend>, report::GenerationError> {
    let model = load_yield_model(config);
    let backend = ReportBackend::from_config(config.gemini())?;
    if let ReportBackend::Offline(_) = backend {
        warn!("GEMINI_API_KEY not set. Reports will be generated offline.");
    }
    info!(
        "Yield model: {}, report backend: {}",
        model.name(),
        backend.name()
    );

    Ok(YieldReportService::new(
        model,
        SoilSuitabilityTable::standard(),
        backend,
    ))
}
