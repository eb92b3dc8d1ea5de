//! One query, one call: credential check, prompt, service call, parse.
//!
//! There is no retry anywhere. The first failure is the answer.

use std::sync::Arc;

use cw_core::{GenerationError, GenerationResult, GenerationService, Query};
use log::{debug, warn};

use crate::credentials::CredentialSource;
use crate::handler::{classify_transport_error, parse_payload};
use crate::prompt::PromptBuilder;

/// Runs the request/response pipeline for a query.
#[derive(Clone)]
pub struct ClueGenerator {
    service: Arc<dyn GenerationService>,
    credentials: Arc<dyn CredentialSource>,
}

impl ClueGenerator {
    pub fn new(service: Arc<dyn GenerationService>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            service,
            credentials,
        }
    }

    /// Generate clues for a query.
    ///
    /// A missing credential short-circuits to
    /// [`GenerationError::Configuration`] without touching the service.
    pub async fn generate(&self, query: &Query) -> Result<GenerationResult, GenerationError> {
        let api_key = self.credentials.api_key().ok_or_else(|| {
            warn!("no API credential configured; skipping the service call");
            GenerationError::Configuration
        })?;

        let request = PromptBuilder::build(query);
        debug!("prompt: {}", request.prompt);

        let payload = self
            .service
            .generate(&api_key, &request)
            .await
            .map_err(|e| {
                let classified = classify_transport_error(&e);
                warn!("generation call failed ({:?}): {}", classified.kind(), e);
                classified
            })?;

        parse_payload(payload.as_deref())
    }
}
