//! # causeway-observability
//!
//! Tracing setup, structured events, span macros, and degradation tracking.

pub mod degradation;
pub mod tracing_setup;

pub use degradation::DegradationTracker;
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
