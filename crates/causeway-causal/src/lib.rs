//! # causeway-causal
//!
//! Turns a transcript into a causal model in four dependent stages:
//! - **pairs**: cause→effect pairs found in the transcript
//! - **chains**: pairs composed into longer directed paths
//! - **confidence**: per-link scores against a fixed evidence rubric
//! - **interventions**: links ranked by deterministic ROI
//!
//! [`CausalPipeline`] runs them in order and assembles the report.

pub mod engine;
pub mod graph;
pub mod prompts;
pub mod scoring;
pub mod stages;
pub mod state;

pub use engine::CausalPipeline;
pub use graph::CausalTextGraph;
pub use state::PipelineState;
