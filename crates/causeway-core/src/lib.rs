//! # causeway-core
//!
//! Foundation crate for the Causeway system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::CausewayConfig;
pub use errors::{CausewayError, CausewayResult, ParseFailure};
pub use memory::{RecordKind, RecordName};
pub use models::{
    AnalysisOutcome, AnalysisReport, CausalChain, CausalPair, ChainEvaluation, ChainKey,
    GenerationOptions, InterventionCandidate, LinkEvaluation, Modifiability,
};
pub use traits::{IDurableStore, IReasoningService};
