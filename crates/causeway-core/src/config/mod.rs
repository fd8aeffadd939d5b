//! Configuration system for Causeway.
//! TOML-based, resolved as: environment > file > compiled defaults.

pub mod causeway_config;
pub mod defaults;
pub mod memory_config;
pub mod observability_config;
pub mod pipeline_config;
pub mod runtime_config;

pub use causeway_config::CausewayConfig;
pub use memory_config::MemoryConfig;
pub use observability_config::ObservabilityConfig;
pub use pipeline_config::PipelineConfig;
pub use runtime_config::RuntimeConfig;
