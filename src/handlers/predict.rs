use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tracing::{info, warn};

use crate::AppState;
use crop_yield::error::AppError;
use crop_yield::models::PredictionResponse;

/// Predict yield and generate a farming report
///
/// The body is read raw so that malformed JSON and missing fields come back
/// as `{"error": ...}` like every other failure.
pub async fn predict_yield(
    state: web::Data<Arc<AppState>>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let value: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidInput(format!("request body is not valid JSON: {}", e)))
        .inspect_err(|e| warn!(kind = e.kind(), "Rejected request: {}", e))?;

    let result = state.service.run(&value).await.inspect_err(|e| {
        warn!(kind = e.kind(), "Report request failed: {}", e);
    })?;

    info!(
        "Predicted {:.2} t/ha, total {:.2} t",
        result.predicted_yield, result.total_yield
    );

    Ok(HttpResponse::Ok().json(PredictionResponse::from(result)))
}
