//! Stage 2: compose pairs into chains.

use tracing::debug;

use causeway_core::models::{DegradationEvent, PipelineStage};
use causeway_core::{CausalChain, CausalPair, CausewayResult, GenerationOptions};
use causeway_extraction::StructuredExtractor;
use causeway_observability::DegradationTracker;

use crate::graph::{maximal_paths, CausalTextGraph};
use crate::prompts;

/// Chain synthesis settings.
#[derive(Debug, Clone, Copy)]
pub struct ChainLimits {
    pub max_chains: usize,
    pub graph_fallback: bool,
    pub max_chain_depth: usize,
}

#[derive(Debug, Clone)]
pub struct ChainBuilder {
    extractor: StructuredExtractor,
    options: GenerationOptions,
    limits: ChainLimits,
}

impl ChainBuilder {
    pub fn new(extractor: StructuredExtractor, options: GenerationOptions, limits: ChainLimits) -> Self {
        Self {
            extractor,
            options,
            limits,
        }
    }

    /// Chains in list order. Items that do not split into two or more
    /// non-empty nodes are dropped whole.
    pub fn build(
        &self,
        pairs: &[CausalPair],
        tracker: &mut DegradationTracker,
    ) -> CausewayResult<Vec<CausalChain>> {
        let prompt = prompts::chains_prompt(pairs);
        let reply = self
            .extractor
            .extract_enumerated(&prompt, &self.options, "numbered chain list")?;

        let mut chains: Vec<CausalChain> = match reply {
            Ok(items) => {
                let parsed: Vec<CausalChain> = items
                    .iter()
                    .filter_map(|item| {
                        let chain = CausalChain::parse(item);
                        if chain.is_none() {
                            debug!(item = %item, "dropping malformed chain");
                        }
                        chain
                    })
                    .take(self.limits.max_chains)
                    .collect();
                if parsed.is_empty() {
                    tracker.record(DegradationEvent::new(
                        PipelineStage::ChainBuilding.as_str(),
                        format!("none of {} items is a chain", items.len()),
                        fallback_label(self.limits.graph_fallback),
                    ));
                }
                parsed
            }
            Err(failure) => {
                tracker.record(DegradationEvent::new(
                    PipelineStage::ChainBuilding.as_str(),
                    failure.to_string(),
                    fallback_label(self.limits.graph_fallback),
                ));
                Vec::new()
            }
        };

        if chains.is_empty() && self.limits.graph_fallback {
            chains = compose_from_pairs(pairs, self.limits);
            debug!(composed = chains.len(), "composed chains from pair graph");
        }
        Ok(chains)
    }
}

/// Maximal simple paths of the pair graph, as chains.
pub fn compose_from_pairs(pairs: &[CausalPair], limits: ChainLimits) -> Vec<CausalChain> {
    let graph = CausalTextGraph::from_pairs(pairs);
    maximal_paths(&graph, limits.max_chain_depth, limits.max_chains)
        .into_iter()
        .filter_map(|nodes| CausalChain::new(nodes).ok())
        .collect()
}

fn fallback_label(graph_fallback: bool) -> &'static str {
    if graph_fallback {
        "chains composed from pair graph"
    } else {
        "empty chain list"
    }
}
