//! Final pipeline output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CausalChain, CausalPair, ChainEvaluation, ChainKey, InterventionRecommendations};
use crate::constants::NO_CAUSAL_PAIRS_ERROR;

/// The four model-backed stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    PairExtraction,
    ChainBuilding,
    ConfidenceScoring,
    InterventionRanking,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 4] = [
        Self::PairExtraction,
        Self::ChainBuilding,
        Self::ConfidenceScoring,
        Self::InterventionRanking,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PairExtraction => "pair_extraction",
            Self::ChainBuilding => "chain_building",
            Self::ConfidenceScoring => "confidence_scoring",
            Self::InterventionRanking => "intervention_ranking",
        }
    }

    /// 1-based position, as shown in progress logs.
    pub fn ordinal(self) -> usize {
        match self {
            Self::PairExtraction => 1,
            Self::ChainBuilding => 2,
            Self::ConfidenceScoring => 3,
            Self::InterventionRanking => 4,
        }
    }
}

/// Immutable snapshot of one transcript's analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub transcript_summary: String,
    /// Total pairs found, before summary truncation.
    pub causal_pairs_found: usize,
    /// Leading pairs only; see `causal_pairs_found` for the total.
    pub pairs: Vec<CausalPair>,
    pub causal_chains: Vec<CausalChain>,
    pub confidence_analysis: BTreeMap<ChainKey, ChainEvaluation>,
    pub intervention_recommendations: InterventionRecommendations,
    pub processing_model: String,
    pub reasoning_depth: String,
}

/// Terminal result of a pipeline run.
///
/// Variant order matters for untagged deserialization: `Aborted` carries every
/// report field plus `error`, so it is tried first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    /// A service failure in stages 2–4; carries everything computed so far.
    Aborted {
        error: String,
        failed_stage: PipelineStage,
        #[serde(flatten)]
        partial: AnalysisReport,
    },
    Report(AnalysisReport),
    /// Stage 1 found nothing; serializes as `{"error": "No causal pairs found"}`.
    NoCausalPairs { error: String },
}

impl AnalysisOutcome {
    pub fn no_causal_pairs() -> Self {
        Self::NoCausalPairs {
            error: NO_CAUSAL_PAIRS_ERROR.to_string(),
        }
    }

    /// The report, complete or partial.
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::Aborted { partial, .. } => Some(partial),
            Self::NoCausalPairs { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Report(_) => None,
            Self::Aborted { error, .. } | Self::NoCausalPairs { error } => Some(error),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Report(_))
    }
}
