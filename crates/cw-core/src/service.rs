//! Seam to the external generation service.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value some deploy pipelines substitute for an unset variable.
const PLACEHOLDER_KEY: &str = "undefined";

/// Decoding effort hint forwarded to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThinkingLevel {
    #[default]
    Low,
}

/// Everything the service needs for one call: prompt, effort hint and the
/// output schema the JSON reply must conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub thinking_level: ThinkingLevel,
    pub response_schema: serde_json::Value,
}

/// A usable API credential.
///
/// Construction rejects blank values and the `"undefined"` placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?.trim();
        if raw.is_empty() || raw == PLACEHOLDER_KEY {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Failure raised by the service client before a payload was obtained.
///
/// Only the message text matters: the response handler classifies it by
/// looking for known markers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// External text generation service.
///
/// `Ok(None)` means the call succeeded but carried no text.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: &GenerationRequest,
    ) -> Result<Option<String>, TransportError>;
}

#[async_trait]
impl<S: GenerationService + ?Sized> GenerationService for Arc<S> {
    async fn generate(
        &self,
        api_key: &ApiKey,
        request: &GenerationRequest,
    ) -> Result<Option<String>, TransportError> {
        (**self).generate(api_key, request).await
    }
}
