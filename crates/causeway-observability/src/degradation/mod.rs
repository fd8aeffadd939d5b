//! Degradation tracking: every time a component substitutes a fallback value.

pub mod tracker;

pub use tracker::DegradationTracker;
