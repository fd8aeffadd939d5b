//! Pipeline run state machine.

use std::fmt;

use causeway_core::models::PipelineStage;

/// Where a run is. Transitions only move forward; `Done` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Started,
    PairsExtracted,
    ChainsBuilt,
    ConfidenceScored,
    InterventionsRanked,
    Done,
    Error,
}

impl PipelineState {
    /// State reached once `stage` completes.
    pub fn after(stage: PipelineStage) -> Self {
        match stage {
            PipelineStage::PairExtraction => Self::PairsExtracted,
            PipelineStage::ChainBuilding => Self::ChainsBuilt,
            PipelineStage::ConfidenceScoring => Self::ConfidenceScored,
            PipelineStage::InterventionRanking => Self::InterventionsRanked,
        }
    }

    /// Stage that runs next, if any.
    pub fn next_stage(self) -> Option<PipelineStage> {
        match self {
            Self::Started => Some(PipelineStage::PairExtraction),
            Self::PairsExtracted => Some(PipelineStage::ChainBuilding),
            Self::ChainsBuilt => Some(PipelineStage::ConfidenceScoring),
            Self::ConfidenceScored => Some(PipelineStage::InterventionRanking),
            Self::InterventionsRanked | Self::Done | Self::Error => None,
        }
    }

    /// Stages completed on the way to this state.
    pub fn completed_stages(self) -> usize {
        match self {
            Self::Started | Self::Error => 0,
            Self::PairsExtracted => 1,
            Self::ChainsBuilt => 2,
            Self::ConfidenceScored => 3,
            Self::InterventionsRanked | Self::Done => 4,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::PairsExtracted => "pairs_extracted",
            Self::ChainsBuilt => "chains_built",
            Self::ConfidenceScored => "confidence_scored",
            Self::InterventionsRanked => "interventions_ranked",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
