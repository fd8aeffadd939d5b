use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What one memory-backed session produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub session_number: u32,
    /// Subject-facing reply with the update block removed.
    pub therapeutic_response: String,
    /// Record names whose merge was persisted, in proposal order.
    pub memory_updates_applied: Vec<String>,
    /// Whether `protocol_evolution` was among the applied updates.
    pub protocol_evolved: bool,
    pub timestamp: DateTime<Utc>,
}
