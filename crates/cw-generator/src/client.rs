//! Gemini API client.
//!
//! Calls `models/{model}:generateContent` once per request with a JSON
//! response schema. Every failure before a payload is obtained is reported
//! as a [`TransportError`] whose text keeps the service's error body, so the
//! response handler can look for its markers.

use std::time::Duration;

use async_trait::async_trait;
use cw_core::{ApiKey, GenerationRequest, GenerationService, ThinkingLevel, TransportError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gemini API configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Model to use
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl GeminiConfig {
    /// Defaults, overridden by `GEMINI_MODEL` and `GEMINI_BASE_URL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(model) = non_blank_env("GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = non_blank_env("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        config
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        debug_assert!(!timeout.is_zero(), "Timeout must be positive");
        self.timeout = timeout;
        self
    }

    /// Full URL of the `generateContent` endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

fn non_blank_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::HttpError(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Get the model being used.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl GenerationService for GeminiClient {
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: &GenerationRequest,
    ) -> Result<Option<String>, TransportError> {
        let body = ApiRequest::new(request);

        log::debug!("POST {} (model {})", self.config.endpoint(), self.config.model);

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::new(format!("[{}] {}", status, text)));
        }

        let envelope: ApiResponse = serde_json::from_str(&text)
            .map_err(|e| TransportError::new(format!("invalid response envelope: {}", e)))?;

        Ok(envelope.text())
    }
}

/// API request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
    thinking_config: ThinkingConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_level: ThinkingLevel,
}

impl<'a> ApiRequest<'a> {
    fn new(request: &'a GenerationRequest) -> Self {
        Self {
            contents: [Content {
                role: "user",
                parts: [Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
                thinking_config: ThinkingConfig {
                    thinking_level: request.thinking_level,
                },
            },
        }
    }
}

/// API response body.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    /// Reasoning summaries are not part of the answer.
    #[serde(default)]
    thought: bool,
}

impl ApiResponse {
    /// Answer text of the first candidate, `None` when there is none.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;

        let text: String = content
            .parts
            .iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Client construction errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    HttpError(String),
}
