//! # causeway-runtime
//!
//! Owns the configured pipeline and session agent, and runs whole cohorts
//! of transcripts through both.

pub mod cohort;
pub mod runtime;

pub use cohort::{CohortEntry, CohortRunner, CohortStep};
pub use runtime::{CausewayRuntime, RuntimeOptions};
