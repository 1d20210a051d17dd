//! Report generation backends
//!
//! The service renders a prompt and hands it to a [`ReportGenerator`]. Two
//! backends ship with the crate:
//! - [`GeminiClient`] calls the Gemini `generateContent` REST endpoint
//! - [`OfflineReportGenerator`] produces a local report when no API key is set

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Report generation errors
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed API response: {0}")]
    Malformed(String),

    #[error("API returned no report text")]
    EmptyResponse,
}

/// Free-form text generation from a prompt
#[allow(async_fn_in_trait)]
pub trait ReportGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Backend name reported by `/health`
    fn name(&self) -> &str;
}

/// Gemini client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Gemini `generateContent` client
///
/// One attempt per prompt; failures are returned to the caller as-is.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl ReportGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = self.endpoint();
        debug!("Requesting report from {}", url);

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        parse_response(status, &text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Turn a `generateContent` HTTP response into report text
fn parse_response(status: StatusCode, body: &str) -> Result<String, GenerationError> {
    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(GenerationError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Malformed(e.to_string()))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}

/// Local report used when no generative backend is configured
#[derive(Debug, Clone, Default)]
pub struct OfflineReportGenerator;

impl ReportGenerator for OfflineReportGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        Ok(format!(
            "Generative report backend is not configured; showing the report request instead.\n\n{}",
            prompt.trim_end()
        ))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// Report backend selected at startup
pub enum ReportBackend {
    Gemini(GeminiClient),
    Offline(OfflineReportGenerator),
}

impl ReportBackend {
    /// Gemini if an API key is available, offline otherwise
    pub fn from_config(config: Option<GeminiConfig>) -> Result<Self, GenerationError> {
        match config {
            Some(cfg) => Ok(ReportBackend::Gemini(GeminiClient::new(cfg)?)),
            None => Ok(ReportBackend::Offline(OfflineReportGenerator)),
        }
    }
}

impl ReportGenerator for ReportBackend {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        match self {
            ReportBackend::Gemini(client) => client.generate(prompt).await,
            ReportBackend::Offline(offline) => offline.generate(prompt).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            ReportBackend::Gemini(client) => client.name(),
            ReportBackend::Offline(offline) => offline.name(),
        }
    }
}
