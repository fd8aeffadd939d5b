//! Stage 3: per-link confidence.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use causeway_core::models::{DegradationEvent, PipelineStage};
use causeway_core::{
    CausalChain, CausewayResult, ChainEvaluation, ChainKey, GenerationOptions, LinkEvaluation,
};
use causeway_extraction::StructuredExtractor;
use causeway_observability::DegradationTracker;

use crate::prompts;

/// Key some replies nest the chain map under.
const WRAPPER_KEY: &str = "confidence_analysis";

#[derive(Debug, Clone)]
pub struct ConfidenceEvaluator {
    extractor: StructuredExtractor,
    options: GenerationOptions,
}

impl ConfidenceEvaluator {
    pub fn new(extractor: StructuredExtractor, options: GenerationOptions) -> Self {
        Self { extractor, options }
    }

    /// Evaluations keyed `chain_N` (1-based input order).
    ///
    /// A chain whose reply entry is missing, has the wrong number of links,
    /// or carries an out-of-range score is left out of the map.
    pub fn evaluate(
        &self,
        transcript: &str,
        chains: &[CausalChain],
        tracker: &mut DegradationTracker,
    ) -> CausewayResult<BTreeMap<ChainKey, ChainEvaluation>> {
        let prompt = prompts::confidence_prompt(transcript, chains);
        let reply = self.extractor.extract_json::<Map<String, Value>>(
            &prompt,
            &self.options,
            "chain confidence object",
        )?;

        let entries = match reply {
            Ok(map) => unwrap_entries(map),
            Err(failure) => {
                tracker.record(DegradationEvent::new(
                    PipelineStage::ConfidenceScoring.as_str(),
                    failure.to_string(),
                    "no chains scored",
                ));
                return Ok(BTreeMap::new());
            }
        };

        let mut scored = BTreeMap::new();
        for (key, entry) in entries {
            let Ok(chain_key) = key.parse::<ChainKey>() else {
                debug!(key = %key, "ignoring non-chain key");
                continue;
            };
            let Some(chain) = chains.get(chain_key.index()) else {
                debug!(key = %key, "ignoring key with no matching chain");
                continue;
            };
            match evaluation_from_value(chain, &entry) {
                Ok(evaluation) => {
                    scored.insert(chain_key, evaluation);
                }
                Err(reason) => {
                    warn!(chain = %chain_key, reason = %reason, "chain left unscored");
                    tracker.record(DegradationEvent::new(
                        PipelineStage::ConfidenceScoring.as_str(),
                        format!("{chain_key}: {reason}"),
                        "chain unscored",
                    ));
                }
            }
        }
        Ok(scored)
    }
}

fn unwrap_entries(mut map: Map<String, Value>) -> Map<String, Value> {
    match map.remove(WRAPPER_KEY) {
        Some(Value::Object(inner)) => inner,
        Some(other) => {
            map.insert(WRAPPER_KEY.to_string(), other);
            map
        }
        None => map,
    }
}

/// Build a checked evaluation from one reply entry. Connection labels are
/// regenerated from the chain's own nodes.
fn evaluation_from_value(chain: &CausalChain, entry: &Value) -> Result<ChainEvaluation, String> {
    let raw_links = entry
        .get("links")
        .and_then(Value::as_array)
        .ok_or_else(|| "entry has no links array".to_string())?;
    if raw_links.len() != chain.link_count() {
        return Err(format!(
            "expected {} links, got {}",
            chain.link_count(),
            raw_links.len()
        ));
    }

    let mut links = Vec::with_capacity(raw_links.len());
    for (raw, connection) in raw_links.iter().zip(chain.link_labels()) {
        let confidence = raw
            .get("confidence")
            .and_then(Value::as_f64)
            .ok_or_else(|| format!("{connection}: confidence is not a number"))?;
        let evidence = raw
            .get("evidence")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        links.push(LinkEvaluation {
            connection,
            confidence,
            evidence,
        });
    }

    let reported = entry.get("overall_confidence").and_then(Value::as_f64);
    ChainEvaluation::new(chain.clone(), links, reported).map_err(|e| e.to_string())
}
