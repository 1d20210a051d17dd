//! Yield report pipeline: request -> prediction -> soil check -> report

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::AppError;
use crate::features::FeatureVector;
use crate::models::{PredictionRequest, PredictionResponse, PredictionResult};
use crate::predictor::{checked_predict, YieldModel};
use crate::prompt::render_prompt;
use crate::report::ReportGenerator;
use crate::soil::SoilSuitabilityTable;

/// Prediction and rendered prompt, before the report backend is called
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedReport {
    pub predicted_yield: f64,
    pub total_yield: f64,
    pub soil_suitability: String,
    pub prompt: String,
}

/// Stateless report handler over read-only, startup-built collaborators
pub struct YieldReportService<G: ReportGenerator> {
    model: Box<dyn YieldModel>,
    soil_table: SoilSuitabilityTable,
    generator: G,
}

impl<G: ReportGenerator> YieldReportService<G> {
    pub fn new(model: Box<dyn YieldModel>, soil_table: SoilSuitabilityTable, generator: G) -> Self {
        Self {
            model,
            soil_table,
            generator,
        }
    }

    pub fn model(&self) -> &dyn YieldModel {
        self.model.as_ref()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn soil_table(&self) -> &SoilSuitabilityTable {
        &self.soil_table
    }

    /// Steps up to, but not including, report generation
    pub fn prepare(&self, req: &PredictionRequest) -> Result<PreparedReport, AppError> {
        let features = FeatureVector::from_request(req);
        let predicted_yield = checked_predict(self.model.as_ref(), &features)?;
        let total_yield = predicted_yield * req.area;
        if !total_yield.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "area {} overflows the total yield",
                req.area
            )));
        }

        let soil_suitability = self
            .soil_table
            .assess(&req.crop, &req.soil_type)
            .message(&req.crop, &req.soil_type);

        let prompt = render_prompt(req, predicted_yield, total_yield, &soil_suitability);

        Ok(PreparedReport {
            predicted_yield,
            total_yield,
            soil_suitability,
            prompt,
        })
    }

    /// The prompt the report backend would receive for `req`
    pub fn render_prompt_for(&self, req: &PredictionRequest) -> Result<String, AppError> {
        self.prepare(req).map(|prepared| prepared.prompt)
    }

    /// Run the full pipeline on an already-parsed request
    pub async fn predict(&self, req: &PredictionRequest) -> Result<PredictionResult, AppError> {
        let prepared = self.prepare(req)?;
        let report = self.generator.generate(&prepared.prompt).await?;

        Ok(PredictionResult {
            predicted_yield: prepared.predicted_yield,
            total_yield: prepared.total_yield,
            soil_suitability: prepared.soil_suitability,
            report,
        })
    }

    /// Extract the request from a JSON body and run the pipeline
    pub async fn run(&self, body: &Value) -> Result<PredictionResult, AppError> {
        let req = PredictionRequest::from_json(body)?;
        self.predict(&req).await
    }

    /// Success body, or `{"error": "..."}` for any failure
    pub async fn handle_report_request(&self, body: &Value) -> Value {
        match self.run(body).await {
            Ok(result) => {
                info!(
                    "Report generated: predicted={:.2} total={:.2}",
                    result.predicted_yield, result.total_yield
                );
                json!(PredictionResponse::from(result))
            }
            Err(e) => {
                warn!(kind = e.kind(), "Report request failed: {}", e);
                json!({ "error": e.to_string() })
            }
        }
    }
}
