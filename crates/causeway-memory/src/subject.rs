//! SubjectMemory: one subject's view of the durable store.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use causeway_core::memory::RecordKind;
use causeway_core::{CausewayResult, IDurableStore, RecordName};
use causeway_observability::tracing_setup::events;

use crate::protocol::ProposedUpdate;

/// Result of merging one update into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Singleton body replaced.
    Replaced,
    /// Session block appended to a log.
    Appended,
    /// The log already ended with this exact session block.
    Unchanged,
}

/// Reads, seeds, and merges records for one subject.
///
/// Writes are not transactional. Two sessions running concurrently for the
/// same subject race: the last write wins on singletons and log appends can
/// interleave or be lost.
#[derive(Clone)]
pub struct SubjectMemory {
    store: Arc<dyn IDurableStore>,
    subject_id: String,
}

impl SubjectMemory {
    pub fn new(store: Arc<dyn IDurableStore>, subject_id: impl Into<String>) -> Self {
        Self {
            store,
            subject_id: subject_id.into(),
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    /// Write the placeholder of every record that does not exist yet.
    ///
    /// Returns the records that were created.
    pub fn seed(&self) -> CausewayResult<Vec<RecordName>> {
        let mut created = Vec::new();
        for record in RecordName::ALL {
            if !self.store.exists(&self.subject_id, record)? {
                self.store
                    .write(&self.subject_id, record, record.placeholder())?;
                created.push(record);
            }
        }
        if !created.is_empty() {
            debug!(subject_id = %self.subject_id, created = created.len(), "seeded memory records");
        }
        Ok(created)
    }

    /// Current body of one record, empty when never written.
    pub fn read(&self, record: RecordName) -> CausewayResult<String> {
        Ok(self
            .store
            .read(&self.subject_id, record)?
            .unwrap_or_default())
    }

    /// Every written record, ordered by name.
    pub fn read_all(&self) -> CausewayResult<BTreeMap<RecordName, String>> {
        let mut records = BTreeMap::new();
        for record in RecordName::ALL {
            if let Some(body) = self.store.read(&self.subject_id, record)? {
                records.insert(record, body);
            }
        }
        Ok(records)
    }

    /// All records rendered as `## <name>\n<body>` sections separated by a blank line.
    pub fn context_blob(&self) -> CausewayResult<String> {
        Ok(self
            .read_all()?
            .iter()
            .map(|(record, body)| format!("## {record}\n{body}"))
            .collect::<Vec<_>>()
            .join("\n\n"))
    }

    /// Merge `content` into `record` according to its kind.
    pub fn merge(
        &self,
        record: RecordName,
        content: &str,
        session_number: u32,
    ) -> CausewayResult<MergeOutcome> {
        let outcome = match record.kind() {
            RecordKind::Singleton => {
                self.store.write(&self.subject_id, record, content)?;
                MergeOutcome::Replaced
            }
            RecordKind::AppendLog => {
                let existing = self.read(record)?;
                let block = session_block(session_number, content);
                if existing.ends_with(&block) {
                    MergeOutcome::Unchanged
                } else {
                    self.store
                        .write(&self.subject_id, record, &format!("{existing}{block}"))?;
                    MergeOutcome::Appended
                }
            }
        };
        Ok(outcome)
    }

    /// Apply proposed updates in order.
    ///
    /// Unknown names and blank or non-string bodies are skipped. A failed
    /// write is logged and left out. Returns the canonical names of records
    /// whose merge holds afterwards, in proposal order.
    pub fn apply_updates(&self, updates: &[ProposedUpdate], session_number: u32) -> Vec<String> {
        let mut applied = Vec::new();
        for update in updates {
            let Some(record) = RecordName::from_label(&update.name) else {
                events::memory_update_rejected(&self.subject_id, &update.name, "unknown record");
                continue;
            };
            let content = match &update.body {
                Value::String(s) if !s.trim().is_empty() => s.as_str(),
                Value::String(_) => {
                    events::memory_update_rejected(&self.subject_id, record.as_str(), "blank body");
                    continue;
                }
                _ => {
                    events::memory_update_rejected(
                        &self.subject_id,
                        record.as_str(),
                        "body is not a string",
                    );
                    continue;
                }
            };
            match self.merge(record, content, session_number) {
                Ok(outcome) => {
                    if outcome != MergeOutcome::Unchanged {
                        events::memory_record_updated(
                            &self.subject_id,
                            record.as_str(),
                            kind_label(record.kind()),
                            session_number,
                        );
                    }
                    applied.push(record.as_str().to_string());
                }
                Err(err) => {
                    events::memory_update_rejected(&self.subject_id, record.as_str(), &err.to_string());
                }
            }
        }
        applied
    }

    /// Read-only JSON projection: `{"subject_id": .., "records": {name: body}}`.
    pub fn snapshot(&self) -> CausewayResult<Value> {
        let records: Map<String, Value> = self
            .read_all()?
            .into_iter()
            .map(|(record, body)| (record.as_str().to_string(), Value::String(body)))
            .collect();
        let mut snapshot = Map::new();
        snapshot.insert("subject_id".into(), Value::String(self.subject_id.clone()));
        snapshot.insert("records".into(), Value::Object(records));
        Ok(Value::Object(snapshot))
    }
}

impl std::fmt::Debug for SubjectMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubjectMemory")
            .field("subject_id", &self.subject_id)
            .finish()
    }
}

fn session_block(session_number: u32, content: &str) -> String {
    format!("\n\n[Session #{session_number}]\n{content}")
}

fn kind_label(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Singleton => "singleton",
        RecordKind::AppendLog => "append_log",
    }
}
