//! SessionAgent: one reasoning call per session, memory in and memory out.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use causeway_core::config::MemoryConfig;
use causeway_core::constants::MEMORY_UPDATES_KEY;
use causeway_core::models::SessionOutcome;
use causeway_core::{CausewayError, CausewayResult, IDurableStore, IReasoningService, RecordName};
use causeway_extraction::{parse_json, StructuredExtractor};
use causeway_observability::session_span;
use causeway_observability::tracing_setup::events;

use crate::prompts;
use crate::protocol::{extract_response, parse_update_block};
use crate::subject::SubjectMemory;
use crate::summary::ProtocolSummary;

/// Runs memory-backed sessions against one durable store.
pub struct SessionAgent {
    extractor: StructuredExtractor,
    store: Arc<dyn IDurableStore>,
    config: MemoryConfig,
}

impl SessionAgent {
    pub fn new(
        service: Arc<dyn IReasoningService>,
        store: Arc<dyn IDurableStore>,
        config: MemoryConfig,
    ) -> Self {
        Self::with_extractor(StructuredExtractor::new(service), store, config)
    }

    pub fn with_extractor(
        extractor: StructuredExtractor,
        store: Arc<dyn IDurableStore>,
        config: MemoryConfig,
    ) -> Self {
        Self {
            extractor,
            store,
            config,
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Memory handle for one subject. Does not seed.
    pub fn subject(&self, subject_id: &str) -> SubjectMemory {
        SubjectMemory::new(Arc::clone(&self.store), subject_id)
    }

    /// Seed, read, interact, merge, extract.
    ///
    /// A reply without a usable update block still yields the response;
    /// only a failed reasoning call or an unreadable store is an error.
    pub fn run_session(
        &self,
        subject_id: &str,
        session_number: u32,
        participant_input: &str,
    ) -> CausewayResult<SessionOutcome> {
        let span = session_span!(subject_id, session_number);
        let _guard = span.enter();

        if participant_input.trim().is_empty() {
            return Err(CausewayError::InvalidInput {
                reason: "session input is empty".to_string(),
            });
        }

        let memory = self.subject(subject_id);
        memory.seed()?;
        let context = memory.context_blob()?;

        let options = self
            .config
            .session
            .clone()
            .with_system(prompts::session_system(&context));
        let reply = self.extractor.generate(
            &prompts::session_message(session_number, participant_input),
            &options,
        )?;

        let block = parse_update_block(&reply);
        let applied = match &block {
            Some(block) => memory.apply_updates(&block.updates, session_number),
            None => {
                if reply.contains(MEMORY_UPDATES_KEY) {
                    warn!(subject_id, session_number, "memory update block did not parse");
                }
                Vec::new()
            }
        };
        let protocol_evolved = applied
            .iter()
            .any(|name| name == RecordName::ProtocolEvolution.as_str());

        events::session_completed(subject_id, session_number, applied.len(), protocol_evolved);

        Ok(SessionOutcome {
            session_number,
            therapeutic_response: extract_response(&reply, block.as_ref()),
            memory_updates_applied: applied,
            protocol_evolved,
            timestamp: Utc::now(),
        })
    }

    /// Ask the collaborator to digest the subject's protocol. Read-only.
    pub fn protocol_summary(&self, subject_id: &str) -> CausewayResult<ProtocolSummary> {
        let context = self.subject(subject_id).context_blob()?;
        let options = self
            .config
            .summary
            .clone()
            .with_system(prompts::SUMMARY_SYSTEM);
        let reply = self
            .extractor
            .generate(&prompts::summary_prompt(&context), &options)?;
        match parse_json(&reply, "protocol digest") {
            Ok(digest) => Ok(ProtocolSummary::Digest(digest)),
            Err(failure) => {
                warn!(subject_id, reason = %failure.reason, "protocol summary fell back to raw text");
                Ok(ProtocolSummary::Raw { raw: reply })
            }
        }
    }

    /// Participant-facing narrative of the whole journey. Read-only.
    pub fn export_journal(&self, subject_id: &str) -> CausewayResult<String> {
        let snapshot = self.subject(subject_id).snapshot()?;
        let rendered = serde_json::to_string_pretty(&snapshot)?;
        let options = self
            .config
            .journal
            .clone()
            .with_system(prompts::JOURNAL_SYSTEM);
        let journal = self
            .extractor
            .generate(&prompts::journal_prompt(&rendered), &options)?;
        info!(subject_id, chars = journal.len(), "journal exported");
        Ok(journal.trim().to_string())
    }
}

impl std::fmt::Debug for SessionAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAgent")
            .field("extractor", &self.extractor)
            .field("root_dir", &self.config.root_dir)
            .finish()
    }
}
