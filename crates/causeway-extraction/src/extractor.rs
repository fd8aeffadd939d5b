//! Reasoning call plus coercion, as one step.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use causeway_core::{CausewayError, CausewayResult, GenerationOptions, IReasoningService, ParseFailure};

use crate::{enumerated, json};

/// Wraps a reasoning service and coerces its replies.
///
/// The outer `Result` only ever carries `ServiceUnavailable`; coercion
/// failures come back as the inner `Err(ParseFailure)`.
#[derive(Clone)]
pub struct StructuredExtractor {
    service: Arc<dyn IReasoningService>,
}

impl StructuredExtractor {
    pub fn new(service: Arc<dyn IReasoningService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<dyn IReasoningService> {
        &self.service
    }

    /// Model id of the wrapped service.
    pub fn model_id(&self) -> &str {
        self.service.model_id()
    }

    /// Send the prompt and return the raw reply.
    pub fn generate(&self, prompt: &str, options: &GenerationOptions) -> CausewayResult<String> {
        debug!(
            service = self.service.name(),
            max_output_tokens = options.max_output_tokens,
            temperature = options.temperature,
            prompt_chars = prompt.len(),
            "reasoning call"
        );
        self.service
            .generate(prompt, options)
            .map_err(|e| CausewayError::service_unavailable(self.service.name(), e))
    }

    /// Request a JSON reply and coerce it into `T`.
    pub fn extract_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        options: &GenerationOptions,
        expected: &str,
    ) -> CausewayResult<Result<T, ParseFailure>> {
        let raw = self.generate(prompt, options)?;
        let parsed = json::parse_json::<T>(&raw, expected);
        if let Err(failure) = &parsed {
            warn!(
                expected = %failure.expected,
                reason = %failure.reason,
                raw = %failure.raw_excerpt(120),
                "reply did not contain the expected JSON"
            );
        }
        Ok(parsed)
    }

    /// Request a numbered list and return its items.
    pub fn extract_enumerated(
        &self,
        prompt: &str,
        options: &GenerationOptions,
        expected: &str,
    ) -> CausewayResult<Result<Vec<String>, ParseFailure>> {
        let raw = self.generate(prompt, options)?;
        let parsed = enumerated::parse_enumerated(&raw, expected);
        if let Err(failure) = &parsed {
            warn!(
                expected = %failure.expected,
                reason = %failure.reason,
                "reply did not contain an enumerated list"
            );
        }
        Ok(parsed)
    }
}

impl std::fmt::Debug for StructuredExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuredExtractor")
            .field("service", &self.service.name())
            .finish()
    }
}
