//! CohortRunner: analysis plus a first session for every transcript.

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use causeway_core::models::SessionOutcome;
use causeway_core::{AnalysisOutcome, CausewayResult};

use crate::runtime::CausewayRuntime;

/// Session number used for a participant's first contact.
const FIRST_SESSION: u32 = 1;

/// Outcome of one step for one participant.
///
/// Serialized as `{"completed": ...}` or `{"failed": {"error": ...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CohortStep<T> {
    Completed(T),
    Failed { error: String },
}

impl<T> CohortStep<T> {
    pub fn completed(&self) -> Option<&T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Completed(_) => None,
            Self::Failed { error } => Some(error),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl<T> From<CausewayResult<T>> for CohortStep<T> {
    fn from(result: CausewayResult<T>) -> Self {
        match result {
            Ok(value) => Self::Completed(value),
            Err(err) => Self::Failed {
                error: err.to_string(),
            },
        }
    }
}

/// Everything produced for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortEntry {
    pub participant_id: String,
    pub causal_analysis: CohortStep<AnalysisOutcome>,
    pub session: CohortStep<SessionOutcome>,
}

/// Drives a list of transcripts through the runtime.
///
/// Each participant runs sequentially; participants run in parallel on
/// the rayon pool when `runtime.parallel_subjects` is set. A failure for
/// one participant is recorded on its entry and never stops the cohort.
#[derive(Debug, Clone)]
pub struct CohortRunner {
    runtime: Arc<CausewayRuntime>,
}

impl CohortRunner {
    pub fn new(runtime: Arc<CausewayRuntime>) -> Self {
        Self { runtime }
    }

    /// `P_000`, `P_001`, ... zero-padded to the configured width.
    pub fn participant_id(&self, index: usize) -> String {
        let width = self.runtime.config.runtime.participant_id_width;
        format!("P_{index:0width$}")
    }

    /// One entry per transcript, in input order.
    pub fn run<S: AsRef<str> + Sync>(&self, transcripts: &[S]) -> Vec<CohortEntry> {
        let started = Instant::now();
        let entries: Vec<CohortEntry> = if self.runtime.config.runtime.parallel_subjects {
            transcripts
                .par_iter()
                .enumerate()
                .map(|(index, transcript)| self.run_one(index, transcript.as_ref()))
                .collect()
        } else {
            transcripts
                .iter()
                .enumerate()
                .map(|(index, transcript)| self.run_one(index, transcript.as_ref()))
                .collect()
        };
        let failed = entries
            .iter()
            .filter(|e| e.causal_analysis.is_failed() || e.session.is_failed())
            .count();
        info!(
            participants = entries.len(),
            failed,
            parallel = self.runtime.config.runtime.parallel_subjects,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "cohort completed"
        );
        entries
    }

    fn run_one(&self, index: usize, transcript: &str) -> CohortEntry {
        let participant_id = self.participant_id(index);

        let causal_analysis = CohortStep::from(self.runtime.pipeline.analyze(transcript));
        if let Some(error) = causal_analysis.error() {
            warn!(participant_id = %participant_id, error, "causal analysis failed");
        }

        let session = CohortStep::from(self.runtime.sessions.run_session(
            &participant_id,
            FIRST_SESSION,
            transcript,
        ));
        if let Some(error) = session.error() {
            warn!(participant_id = %participant_id, error, "first session failed");
        }

        CohortEntry {
            participant_id,
            causal_analysis,
            session,
        }
    }
}
