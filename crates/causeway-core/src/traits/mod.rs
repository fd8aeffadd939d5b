//! Seams to the two external collaborators.

pub mod durable_store;
pub mod reasoning;

pub use durable_store::IDurableStore;
pub use reasoning::IReasoningService;
