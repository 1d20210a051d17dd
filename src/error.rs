use thiserror::Error;

use crate::predictor::PredictionError;
use crate::report::GenerationError;

/// Application error types
///
/// Every variant is terminal for the request. The HTTP layer renders all of
/// them the same way: a 200 response whose body is `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required request field is absent
    #[error("Missing required field: {0}")]
    MissingField(String),
    /// A request field is present but unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The yield model failed or returned an unusable value
    #[error("Prediction failed: {0}")]
    PredictionFailure(#[from] PredictionError),
    /// The report backend failed
    #[error("Report generation failed: {0}")]
    ReportGenerationFailure(#[from] GenerationError),
}

impl AppError {
    /// Stable tag for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingField(_) => "missing_field",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::PredictionFailure(_) => "prediction_failure",
            AppError::ReportGenerationFailure(_) => "report_generation_failure",
        }
    }
}

#[cfg(feature = "api")]
mod http {
    use actix_web::{http::StatusCode, HttpResponse, ResponseError};

    use super::AppError;
    use crate::models::ErrorResponse;

    impl ResponseError for AppError {
        fn status_code(&self) -> StatusCode {
            StatusCode::OK
        }

        fn error_response(&self) -> HttpResponse {
            HttpResponse::build(self.status_code()).json(ErrorResponse {
                error: self.to_string(),
            })
        }
    }
}
