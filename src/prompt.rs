//! Farming report prompt template

use crate::models::PredictionRequest;

/// Topics the report must cover, in order
pub const REPORT_TOPICS: [&str; 5] = [
    "Farming suggestions",
    "Fertilizer recommendations",
    "Pest and disease control",
    "Irrigation management",
    "Best agricultural practices",
];

/// Render the report prompt for one request
///
/// Request strings are embedded verbatim; numbers are fixed to two decimals.
pub fn render_prompt(
    req: &PredictionRequest,
    predicted_yield: f64,
    total_yield: f64,
    soil_comment: &str,
) -> String {
    let mut prompt = format!(
        "Generate a detailed farming report for:\n\
         - State: {state}\n\
         - Crop: {crop}\n\
         - Soil: {soil}\n\
         - Season: {season}\n\
         - Rainfall: {rainfall}\n\
         - Area: {area:.2} hectares\n\
         - Predicted Yield: {predicted:.2} tons/hectare\n\
         - Total Yield: {total:.2} tons\n\
         \n\
         Soil comment: {soil_comment}\n\
         \n\
         Include:\n",
        state = req.state,
        crop = req.crop,
        soil = req.soil_type,
        season = req.season,
        rainfall = req.rainfall_category,
        area = req.area,
        predicted = predicted_yield,
        total = total_yield,
        soil_comment = soil_comment,
    );

    for (i, topic) in REPORT_TOPICS.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, topic));
    }

    prompt
}
