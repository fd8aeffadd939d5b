/// Durable store errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("invalid subject id {subject_id:?}: {reason}")]
    InvalidSubject { subject_id: String, reason: String },

    #[error("record {record} missing for subject {subject_id}")]
    RecordMissing { subject_id: String, record: String },
}
