//! Data model shared by the pipeline, the memory store, and the runtime.

pub mod causal_chain;
pub mod causal_pair;
pub mod degradation_event;
pub mod evaluation;
pub mod generation;
pub mod intervention;
pub mod report;
pub mod session_outcome;

pub use causal_chain::CausalChain;
pub use causal_pair::CausalPair;
pub use degradation_event::DegradationEvent;
pub use evaluation::{aggregate_link_confidence, ChainEvaluation, ChainKey, LinkEvaluation};
pub use generation::GenerationOptions;
pub use intervention::{InterventionCandidate, InterventionRecommendations, Modifiability};
pub use report::{AnalysisOutcome, AnalysisReport, PipelineStage};
pub use session_outcome::SessionOutcome;
