//! Structured log events for key pipeline and memory operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// A pipeline stage finished.
pub fn stage_completed(stage: &str, items: usize, elapsed_ms: u128) {
    tracing::info!(
        event = "stage_completed",
        stage = %stage,
        items = items,
        elapsed_ms = elapsed_ms as u64,
        "stage completed"
    );
}

/// A collaborator reply was unusable and a fallback value was substituted.
pub fn parse_degraded(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "parse_degraded",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "reply parse degraded"
    );
}

/// The pipeline stopped before running every stage.
pub fn pipeline_short_circuited(reason: &str, completed_stages: usize) {
    tracing::warn!(
        event = "pipeline_short_circuited",
        reason = %reason,
        completed_stages = completed_stages,
        "pipeline short-circuited"
    );
}

/// A memory record merge was persisted.
pub fn memory_record_updated(subject_id: &str, record: &str, kind: &str, session_number: u32) {
    tracing::info!(
        event = "memory_record_updated",
        subject_id = %subject_id,
        record = %record,
        kind = %kind,
        session_number = session_number,
        "memory record updated"
    );
}

/// A proposed memory update was ignored or failed to persist.
pub fn memory_update_rejected(subject_id: &str, record: &str, reason: &str) {
    tracing::warn!(
        event = "memory_update_rejected",
        subject_id = %subject_id,
        record = %record,
        reason = %reason,
        "memory update rejected"
    );
}

/// A session finished.
pub fn session_completed(subject_id: &str, session_number: u32, applied: usize, protocol_evolved: bool) {
    tracing::info!(
        event = "session_completed",
        subject_id = %subject_id,
        session_number = session_number,
        applied = applied,
        protocol_evolved = protocol_evolved,
        "session completed"
    );
}
