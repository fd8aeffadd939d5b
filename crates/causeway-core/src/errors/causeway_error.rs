use super::{ConfigError, StorageError};

/// Result alias used across the workspace.
pub type CausewayResult<T> = Result<T, CausewayError>;

/// Top-level error for every fallible Causeway operation.
///
/// Collaborator replies that fail to parse are not errors: they surface as
/// [`super::ParseFailure`] values and are recovered by the caller.
#[derive(Debug, thiserror::Error)]
pub enum CausewayError {
    #[error("reasoning service {service} unavailable: {reason}")]
    ServiceUnavailable { service: String, reason: String },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("unknown memory record: {name}")]
    UnknownRecord { name: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CausewayError {
    /// Wrap any collaborator failure as `ServiceUnavailable`, keeping an
    /// existing `ServiceUnavailable` untouched.
    pub fn service_unavailable(service: &str, err: CausewayError) -> Self {
        match err {
            already @ CausewayError::ServiceUnavailable { .. } => already,
            other => CausewayError::ServiceUnavailable {
                service: service.to_string(),
                reason: other.to_string(),
            },
        }
    }

    /// Whether this error came from the reasoning service.
    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, CausewayError::ServiceUnavailable { .. })
    }
}
