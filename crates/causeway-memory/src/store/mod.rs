//! Durable store implementations.

pub mod fs_store;
pub mod in_memory;

pub use fs_store::FsStore;
pub use in_memory::InMemoryStore;

use causeway_core::errors::StorageError;
use causeway_core::CausewayResult;

/// Subject ids become directory names; keep them to a safe alphabet.
pub fn validate_subject_id(subject_id: &str) -> CausewayResult<()> {
    let reason = if subject_id.is_empty() {
        Some("must not be empty")
    } else if subject_id == "." || subject_id == ".." {
        Some("must not be a relative path component")
    } else if !subject_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        Some("only ASCII letters, digits, '_', '-' and '.' are allowed")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(StorageError::InvalidSubject {
            subject_id: subject_id.to_string(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}
