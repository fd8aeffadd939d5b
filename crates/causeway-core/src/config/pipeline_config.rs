use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::GenerationOptions;

/// Causal pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stage 1 generation options.
    pub pairs: GenerationOptions,
    /// Stage 2 generation options.
    pub chains: GenerationOptions,
    /// Stage 3 generation options.
    pub confidence: GenerationOptions,
    /// Stage 4 generation options.
    pub interventions: GenerationOptions,
    /// Maximum chains kept from stage 2.
    pub max_chains: usize,
    /// Compose chains from the pair graph when the collaborator yields none.
    pub graph_fallback: bool,
    /// Longest path considered by the graph fallback.
    pub max_chain_depth: usize,
    /// Inclusive confidence floor for intervention candidates.
    pub min_intervention_confidence: f64,
    /// Candidates retained after ranking (never more than 3).
    pub max_interventions: usize,
    /// Characters of transcript kept in the report summary.
    pub summary_chars: usize,
    /// Pairs listed in the report summary.
    pub summary_pairs: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pairs: GenerationOptions::with_temperature(
                defaults::DEFAULT_PAIRS_MAX_TOKENS,
                defaults::DEFAULT_PAIRS_TEMPERATURE,
            ),
            chains: GenerationOptions::with_temperature(
                defaults::DEFAULT_CHAINS_MAX_TOKENS,
                defaults::DEFAULT_CHAINS_TEMPERATURE,
            ),
            confidence: GenerationOptions::with_temperature(
                defaults::DEFAULT_CONFIDENCE_MAX_TOKENS,
                defaults::DEFAULT_CONFIDENCE_TEMPERATURE,
            ),
            interventions: GenerationOptions::with_temperature(
                defaults::DEFAULT_INTERVENTIONS_MAX_TOKENS,
                defaults::DEFAULT_INTERVENTIONS_TEMPERATURE,
            ),
            max_chains: defaults::DEFAULT_MAX_CHAINS,
            graph_fallback: defaults::DEFAULT_GRAPH_FALLBACK,
            max_chain_depth: defaults::DEFAULT_MAX_CHAIN_DEPTH,
            min_intervention_confidence: defaults::DEFAULT_MIN_INTERVENTION_CONFIDENCE,
            max_interventions: defaults::DEFAULT_MAX_INTERVENTIONS,
            summary_chars: defaults::DEFAULT_SUMMARY_CHARS,
            summary_pairs: defaults::DEFAULT_SUMMARY_PAIRS,
        }
    }
}
