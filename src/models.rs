use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Yield report request
///
/// Built from a raw JSON body rather than derived, so that missing keys and
/// unparseable areas map onto the service's own error kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub state: String,
    pub crop: String,
    pub soil_type: String,
    pub season: String,
    pub rainfall_category: String,
    pub area: f64,
}

impl PredictionRequest {
    /// Extract the six required fields from a JSON object
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let obj = body
            .as_object()
            .ok_or_else(|| AppError::InvalidInput("request body must be a JSON object".into()))?;

        let text = |key: &str| -> Result<String, AppError> {
            let value = obj
                .get(key)
                .ok_or_else(|| AppError::MissingField(key.to_string()))?;
            match value {
                Value::String(s) => Ok(s.clone()),
                Value::Number(n) => Ok(n.to_string()),
                Value::Bool(b) => Ok(b.to_string()),
                _ => Err(AppError::InvalidInput(format!(
                    "field '{}' must be a string, got {}",
                    key, value
                ))),
            }
        };

        let state = text("state")?;
        let crop = text("crop")?;
        let soil_type = text("soil_type")?;
        let season = text("season")?;
        let rainfall_category = text("rainfall_category")?;

        let area_value = obj
            .get("area")
            .ok_or_else(|| AppError::MissingField("area".to_string()))?;
        let area = parse_area(area_value)?;

        Ok(Self {
            state,
            crop,
            soil_type,
            season,
            rainfall_category,
            area,
        })
    }
}

/// Parse `area` from a JSON number or a numeric string
fn parse_area(value: &Value) -> Result<f64, AppError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AppError::InvalidInput(format!("area is not a float: {}", n))),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            AppError::InvalidInput(format!("could not convert area to float: '{}'", s))
        }),
        other => Err(AppError::InvalidInput(format!(
            "could not convert area to float: {}",
            other
        ))),
    }
}

/// Result of one pass through the yield report pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub predicted_yield: f64,
    pub total_yield: f64,
    pub soil_suitability: String,
    pub report: String,
}

/// Successful `/predict` response
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_yield_per_hectare: f64,
    pub total_yield: f64,
    pub report: String,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            predicted_yield_per_hectare: result.predicted_yield,
            total_yield: result.total_yield,
            report: result.report,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model_loaded: bool,
    pub model_backend: String,
    pub report_backend: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_body() -> Value {
        json!({
            "state": "Punjab",
            "crop": "Wheat",
            "soil_type": "Loamy",
            "season": "Rabi",
            "rainfall_category": "Medium",
            "area": "12.5"
        })
    }

    #[test]
    fn test_from_json_valid() {
        let req = PredictionRequest::from_json(&full_body()).unwrap();
        assert_eq!(req.state, "Punjab");
        assert_eq!(req.crop, "Wheat");
        assert_eq!(req.soil_type, "Loamy");
        assert_eq!(req.season, "Rabi");
        assert_eq!(req.rainfall_category, "Medium");
        assert_eq!(req.area, 12.5);
    }

    #[test]
    fn test_area_accepts_number() {
        let mut body = full_body();
        body["area"] = json!(3);
        let req = PredictionRequest::from_json(&body).unwrap();
        assert_eq!(req.area, 3.0);
    }

    #[test]
    fn test_area_string_is_trimmed() {
        let mut body = full_body();
        body["area"] = json!(" 7.25 ");
        let req = PredictionRequest::from_json(&body).unwrap();
        assert_eq!(req.area, 7.25);
    }

    #[test]
    fn test_area_non_numeric() {
        let mut body = full_body();
        body["area"] = json!("abc");
        let err = PredictionRequest::from_json(&body).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_area_null_is_invalid() {
        let mut body = full_body();
        body["area"] = Value::Null;
        let err = PredictionRequest::from_json(&body).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_fields() {
        for key in ["state", "crop", "soil_type", "season", "rainfall_category", "area"] {
            let mut body = full_body();
            body.as_object_mut().unwrap().remove(key);
            match PredictionRequest::from_json(&body) {
                Err(AppError::MissingField(field)) => assert_eq!(field, key),
                other => panic!("expected MissingField({}), got {:?}", key, other),
            }
        }
    }

    #[test]
    fn test_unlisted_values_accepted() {
        let mut body = full_body();
        body["crop"] = json!("Quinoa");
        body["soil_type"] = json!("Volcanic");
        let req = PredictionRequest::from_json(&body).unwrap();
        assert_eq!(req.crop, "Quinoa");
        assert_eq!(req.soil_type, "Volcanic");
    }

    #[test]
    fn test_scalar_fields_rendered_as_text() {
        let mut body = full_body();
        body["season"] = json!(2024);
        let req = PredictionRequest::from_json(&body).unwrap();
        assert_eq!(req.season, "2024");
    }

    #[test]
    fn test_not_an_object() {
        let err = PredictionRequest::from_json(&json!(["Wheat"])).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn test_response_from_result() {
        let result = PredictionResult {
            predicted_yield: 3.2,
            total_yield: 6.4,
            soil_suitability: "Loamy is ideal for Wheat.".into(),
            report: "report".into(),
        };
        let response = PredictionResponse::from(result);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["predicted_yield_per_hectare"], json!(3.2));
        assert_eq!(value["total_yield"], json!(6.4));
        assert_eq!(value["report"], json!("report"));
        assert!(value.get("soil_suitability").is_none());
    }
}
