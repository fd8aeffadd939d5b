use crate::errors::CausewayResult;
use crate::memory::RecordName;

/// Directory-like mapping from `(subject_id, record)` to a text blob.
///
/// No locking and no transactions: concurrent writers for the same subject
/// race, last write wins.
pub trait IDurableStore: Send + Sync {
    /// Whether the record has ever been written for this subject.
    fn exists(&self, subject_id: &str, record: RecordName) -> CausewayResult<bool>;

    /// Read a record body, `None` if it was never written.
    fn read(&self, subject_id: &str, record: RecordName) -> CausewayResult<Option<String>>;

    /// Replace the whole record body.
    fn write(&self, subject_id: &str, record: RecordName, body: &str) -> CausewayResult<()>;
}
