use crate::errors::CausewayResult;
use crate::models::GenerationOptions;

/// Text-generation collaborator invoked by every pipeline stage and session.
///
/// Treated as effectful, possibly failing, and possibly inconsistent between
/// calls. Latency, rate limits, and cancellation belong to the implementation.
pub trait IReasoningService: Send + Sync {
    /// Send a prompt, receive free-form text.
    fn generate(&self, prompt: &str, options: &GenerationOptions) -> CausewayResult<String>;

    /// Identifier of the underlying model, recorded as report provenance.
    fn model_id(&self) -> &str;

    /// Human-readable service name.
    fn name(&self) -> &str;
}
