//! Process-local store for tests and ephemeral runs.

use dashmap::DashMap;

use causeway_core::{CausewayResult, IDurableStore, RecordName};

use super::validate_subject_id;

/// Concurrent map from `(subject_id, record)` to body.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: DashMap<(String, RecordName), String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all subjects.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Subjects with at least one record, sorted.
    pub fn subjects(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.records.iter().map(|e| e.key().0.clone()).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

impl IDurableStore for InMemoryStore {
    fn exists(&self, subject_id: &str, record: RecordName) -> CausewayResult<bool> {
        validate_subject_id(subject_id)?;
        Ok(self.records.contains_key(&(subject_id.to_string(), record)))
    }

    fn read(&self, subject_id: &str, record: RecordName) -> CausewayResult<Option<String>> {
        validate_subject_id(subject_id)?;
        Ok(self
            .records
            .get(&(subject_id.to_string(), record))
            .map(|body| body.clone()))
    }

    fn write(&self, subject_id: &str, record: RecordName, body: &str) -> CausewayResult<()> {
        validate_subject_id(subject_id)?;
        self.records
            .insert((subject_id.to_string(), record), body.to_string());
        Ok(())
    }
}
