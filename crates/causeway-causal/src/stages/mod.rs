//! The four model-backed stages. Each owns its prompt, its reply shape, and
//! its local recovery from unparseable replies.

pub mod chains;
pub mod confidence;
pub mod interventions;
pub mod pairs;

pub use chains::ChainBuilder;
pub use confidence::ConfidenceEvaluator;
pub use interventions::InterventionRanker;
pub use pairs::PairExtractor;
