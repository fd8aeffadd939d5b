//! Stage 4: rank links by intervention ROI.
//!
//! The collaborator proposes candidates; every number that decides the
//! ranking is recomputed here from the chains and their evaluations.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde_json::Value;
use tracing::debug;

use causeway_core::constants::{CHAIN_DISPLAY_DELIMITER, MAX_INTERVENTION_CANDIDATES};
use causeway_core::models::{
    causal_chain::split_directional, DegradationEvent, InterventionRecommendations, PipelineStage,
};
use causeway_core::{
    CausalChain, CausewayResult, ChainEvaluation, ChainKey, GenerationOptions,
    InterventionCandidate, Modifiability,
};
use causeway_extraction::StructuredExtractor;
use causeway_observability::DegradationTracker;

use crate::graph::{normalize_node, reachable_count, CausalTextGraph};
use crate::prompts;
use crate::scoring::roi_score;

/// Keys a reply may list candidates under.
const CANDIDATE_KEYS: [&str; 2] = ["highest_roi_interventions", "interventions"];

/// Ranking thresholds.
#[derive(Debug, Clone, Copy)]
pub struct RankingLimits {
    /// Inclusive floor on link confidence.
    pub min_confidence: f64,
    /// Capped at three regardless of configuration.
    pub max_candidates: usize,
}

#[derive(Debug, Clone)]
pub struct InterventionRanker {
    extractor: StructuredExtractor,
    options: GenerationOptions,
    limits: RankingLimits,
}

impl InterventionRanker {
    pub fn new(extractor: StructuredExtractor, options: GenerationOptions, limits: RankingLimits) -> Self {
        Self {
            extractor,
            options,
            limits,
        }
    }

    pub fn rank(
        &self,
        chains: &[CausalChain],
        evaluations: &BTreeMap<ChainKey, ChainEvaluation>,
        tracker: &mut DegradationTracker,
    ) -> CausewayResult<InterventionRecommendations> {
        let prompt = prompts::interventions_prompt(chains, evaluations);
        let reply = self.extractor.extract_json::<serde_json::Map<String, Value>>(
            &prompt,
            &self.options,
            "intervention candidates object",
        )?;

        let raw_candidates = match reply {
            Ok(map) => CANDIDATE_KEYS
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_array).cloned())
                .unwrap_or_default(),
            Err(failure) => {
                tracker.record(DegradationEvent::new(
                    PipelineStage::InterventionRanking.as_str(),
                    failure.to_string(),
                    "no interventions",
                ));
                Vec::new()
            }
        };

        let context = RankingContext::new(chains, evaluations);
        let candidates = raw_candidates
            .iter()
            .filter_map(|raw| context.score(raw, self.limits.min_confidence))
            .collect();
        Ok(finalize(candidates, self.limits.max_candidates))
    }
}

/// Chain graph plus the best evaluated confidence of every link.
pub struct RankingContext {
    graph: CausalTextGraph,
    link_confidence: HashMap<(String, String), f64>,
}

impl RankingContext {
    pub fn new(chains: &[CausalChain], evaluations: &BTreeMap<ChainKey, ChainEvaluation>) -> Self {
        let mut link_confidence: HashMap<(String, String), f64> = HashMap::new();
        for evaluation in evaluations.values() {
            for ((cause, effect), link) in evaluation.chain.links().zip(&evaluation.links) {
                let key = (normalize_node(cause), normalize_node(effect));
                let best = link_confidence.entry(key).or_insert(link.confidence);
                *best = best.max(link.confidence);
            }
        }
        Self {
            graph: CausalTextGraph::from_chains(chains),
            link_confidence,
        }
    }

    /// Score one proposed candidate; `None` if it is rejected.
    pub fn score(&self, raw: &Value, min_confidence: f64) -> Option<InterventionCandidate> {
        let (cause, effect) = resolve_link(raw)?;
        let key = (normalize_node(&cause), normalize_node(&effect));

        let confidence = match self.link_confidence.get(&key) {
            Some(&evaluated) => evaluated,
            None => {
                let reported = raw.get("confidence").and_then(Value::as_f64)?;
                if !reported.is_finite() || !(0.0..=1.0).contains(&reported) {
                    debug!(cause = %cause, effect = %effect, reported, "out-of-range confidence");
                    return None;
                }
                reported
            }
        };
        if confidence < min_confidence {
            debug!(cause = %cause, effect = %effect, confidence, "below confidence floor");
            return None;
        }

        let in_graph = self.graph.has_link(&cause, &effect);
        let leverage = if in_graph {
            reachable_count(&self.graph, &effect)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0)
        } else {
            raw.get("leverage_blocked_effects")
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0)
        };

        let modifiability = raw
            .get("modifiability")
            .and_then(Value::as_str)
            .and_then(Modifiability::from_label)
            .unwrap_or(Modifiability::Low);
        let suggestions = dedup_suggestions(raw.get("suggested_interventions"));

        let link = if in_graph {
            self.display_link(&cause, &effect)
        } else {
            format!("{cause}{CHAIN_DISPLAY_DELIMITER}{effect}")
        };

        Some(InterventionCandidate {
            link,
            confidence,
            roi_score: roi_score(confidence, modifiability, leverage, suggestions.len()),
            modifiability,
            leverage_blocked_effects: leverage,
            suggested_interventions: suggestions,
            reasoning: raw
                .get("reasoning")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string(),
            reported_roi_score: raw.get("roi_score").and_then(Value::as_f64),
        })
    }

    fn display_link(&self, cause: &str, effect: &str) -> String {
        let label = |text: &str| {
            self.graph
                .get_node(text)
                .and_then(|idx| self.graph.label(idx))
                .unwrap_or(text)
                .to_string()
        };
        format!("{}{CHAIN_DISPLAY_DELIMITER}{}", label(cause), label(effect))
    }
}

/// `(cause, effect)` from a `"link"` string or explicit `cause`/`effect` fields.
fn resolve_link(raw: &Value) -> Option<(String, String)> {
    if let Some(text) = raw.get("link").and_then(Value::as_str) {
        let nodes = split_directional(text)?;
        if let [cause, effect] = nodes.as_slice() {
            return Some((cause.clone(), effect.clone()));
        }
        debug!(link = %text, "link does not name exactly two nodes");
        return None;
    }
    let cause = raw.get("cause")?.as_str()?.trim();
    let effect = raw.get("effect")?.as_str()?.trim();
    (!cause.is_empty() && !effect.is_empty()).then(|| (cause.to_string(), effect.to_string()))
}

fn dedup_suggestions(value: Option<&Value>) -> Vec<String> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Dedupe by normalized link (best ROI wins), sort descending, truncate.
pub fn finalize(mut candidates: Vec<InterventionCandidate>, max_candidates: usize) -> InterventionRecommendations {
    candidates.sort_by(|a, b| b.roi_score.total_cmp(&a.roi_score));

    let mut seen = HashSet::new();
    candidates.retain(|c| {
        let key = split_directional(&c.link)
            .map(|nodes| nodes.iter().map(|n| normalize_node(n)).collect::<Vec<_>>())
            .unwrap_or_else(|| vec![normalize_node(&c.link)]);
        seen.insert(key)
    });
    candidates.truncate(max_candidates.min(MAX_INTERVENTION_CANDIDATES));

    InterventionRecommendations {
        highest_roi_interventions: candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_core::LinkEvaluation;
    use serde_json::json;

    fn context() -> RankingContext {
        let chain = CausalChain::parse("news → anxious → can't sleep").unwrap();
        let links = vec![
            LinkEvaluation {
                connection: "news→anxious".into(),
                confidence: 0.9,
                evidence: String::new(),
            },
            LinkEvaluation {
                connection: "anxious→can't sleep".into(),
                confidence: 0.8,
                evidence: String::new(),
            },
        ];
        let mut evaluations = BTreeMap::new();
        evaluations.insert(
            ChainKey::from_index(0),
            ChainEvaluation::new(chain.clone(), links, None).unwrap(),
        );
        RankingContext::new(&[chain], &evaluations)
    }

    #[test]
    fn evaluated_confidence_overrides_reported() {
        let candidate = context()
            .score(&json!({"link": "Anxious -> can't sleep", "confidence": 0.1, "modifiability": "high"}), 0.8)
            .unwrap();
        assert_eq!(candidate.confidence, 0.8);
        assert_eq!(candidate.link, "anxious → can't sleep");
        assert_eq!(candidate.leverage_blocked_effects, 1);
    }

    #[test]
    fn unmatched_link_uses_reported_values() {
        let ctx = context();
        let candidate = ctx
            .score(
                &json!({"cause": "doomscrolling", "effect": "news", "confidence": 0.85, "leverage_blocked_effects": 4}),
                0.8,
            )
            .unwrap();
        assert_eq!(candidate.confidence, 0.85);
        assert_eq!(candidate.leverage_blocked_effects, 4);
        assert_eq!(candidate.modifiability, Modifiability::Low);

        assert!(ctx.score(&json!({"link": "a → b", "confidence": 1.3}), 0.8).is_none());
        assert!(ctx.score(&json!({"link": "a → b"}), 0.8).is_none());
    }

    #[test]
    fn confidence_floor_is_inclusive() {
        let ctx = context();
        assert!(ctx.score(&json!({"link": "x → y", "confidence": 0.8}), 0.8).is_some());
        assert!(ctx.score(&json!({"link": "x → y", "confidence": 0.79999}), 0.8).is_none());
    }

    #[test]
    fn suggestions_are_deduplicated_in_order() {
        let suggestions = dedup_suggestions(Some(&json!(["CBT", "sleep hygiene", "cbt", " ", 3])));
        assert_eq!(suggestions, ["CBT", "sleep hygiene"]);
    }

    #[test]
    fn three_node_links_are_rejected() {
        assert!(resolve_link(&json!({"link": "a → b → c"})).is_none());
    }
}
