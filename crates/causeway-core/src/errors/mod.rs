//! Error handling for Causeway.
//! One error enum per concern, `thiserror` only, aggregated into [`CausewayError`].

pub mod causeway_error;
pub mod config_error;
pub mod parse_failure;
pub mod storage_error;

pub use causeway_error::{CausewayError, CausewayResult};
pub use config_error::ConfigError;
pub use parse_failure::ParseFailure;
pub use storage_error::StorageError;
