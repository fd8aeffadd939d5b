//! File-backed store: `<root>/participant_<id>/<record>.md`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use causeway_core::constants::SUBJECT_NAMESPACE_PREFIX;
use causeway_core::errors::StorageError;
use causeway_core::{CausewayResult, IDurableStore, RecordName};

use super::validate_subject_id;

/// One directory per subject, one Markdown file per record.
///
/// Writes replace the whole file; there is no locking.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding a subject's records.
    pub fn subject_dir(&self, subject_id: &str) -> CausewayResult<PathBuf> {
        validate_subject_id(subject_id)?;
        Ok(self
            .root
            .join(format!("{SUBJECT_NAMESPACE_PREFIX}{subject_id}")))
    }

    pub fn record_path(&self, subject_id: &str, record: RecordName) -> CausewayResult<PathBuf> {
        Ok(self.subject_dir(subject_id)?.join(record.file_name()))
    }
}

impl IDurableStore for FsStore {
    fn exists(&self, subject_id: &str, record: RecordName) -> CausewayResult<bool> {
        Ok(self.record_path(subject_id, record)?.is_file())
    }

    fn read(&self, subject_id: &str, record: RecordName) -> CausewayResult<Option<String>> {
        let path = self.record_path(subject_id, record)?;
        match std::fs::read_to_string(&path) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn write(&self, subject_id: &str, record: RecordName, body: &str) -> CausewayResult<()> {
        let path = self.record_path(subject_id, record)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
        }
        std::fs::write(&path, body).map_err(|e| io_error(&path, e))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> causeway_core::CausewayError {
    StorageError::Io {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
    .into()
}
