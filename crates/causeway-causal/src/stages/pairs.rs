//! Stage 1: cause→effect pairs.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use causeway_core::models::{DegradationEvent, PipelineStage};
use causeway_core::{CausalPair, CausewayError, CausewayResult, GenerationOptions};
use causeway_extraction::StructuredExtractor;
use causeway_observability::DegradationTracker;

use crate::prompts;

#[derive(Debug, Deserialize)]
struct PairsReply {
    pairs: Vec<Value>,
}

/// Extracts pairs in discovery order. Pairs are not deduplicated.
#[derive(Debug, Clone)]
pub struct PairExtractor {
    extractor: StructuredExtractor,
    options: GenerationOptions,
}

impl PairExtractor {
    pub fn new(extractor: StructuredExtractor, options: GenerationOptions) -> Self {
        Self { extractor, options }
    }

    /// An unparseable reply degrades to zero pairs.
    pub fn extract(
        &self,
        transcript: &str,
        tracker: &mut DegradationTracker,
    ) -> CausewayResult<Vec<CausalPair>> {
        if transcript.trim().is_empty() {
            return Err(CausewayError::InvalidInput {
                reason: "transcript is empty".to_string(),
            });
        }

        let prompt = prompts::pairs_prompt(transcript);
        let reply = self
            .extractor
            .extract_json::<PairsReply>(&prompt, &self.options, "causal pairs object")?;

        match reply {
            Ok(reply) => Ok(reply.pairs.iter().filter_map(pair_from_value).collect()),
            Err(failure) => {
                tracker.record(DegradationEvent::new(
                    PipelineStage::PairExtraction.as_str(),
                    failure.to_string(),
                    "empty pair list",
                ));
                Ok(Vec::new())
            }
        }
    }
}

fn pair_from_value(value: &Value) -> Option<CausalPair> {
    let cause = value.get("cause")?.as_str()?.trim();
    let effect = value.get("effect")?.as_str()?.trim();
    let pair = CausalPair::new(cause, effect, explicit_flag(value.get("explicit")));
    if !pair.is_well_formed() {
        debug!(?value, "dropping pair with an empty endpoint");
        return None;
    }
    Some(pair)
}

fn explicit_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => matches!(s.trim().to_lowercase().as_str(), "true" | "yes" | "explicit"),
        _ => false,
    }
}
