use serde::{Deserialize, Serialize};

/// A collaborator reply that could not be coerced into the expected structure.
///
/// Carries the raw reply for diagnostics. Callers recover from it locally by
/// falling back to an empty or default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("could not parse {expected}: {reason}")]
pub struct ParseFailure {
    /// What the call site expected, e.g. "causal pairs object".
    pub expected: String,
    /// Why the last parse attempt failed.
    pub reason: String,
    /// The unmodified collaborator reply.
    pub raw: String,
}

impl ParseFailure {
    pub fn new(expected: impl Into<String>, reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// First `max_chars` characters of the raw reply, for log lines.
    pub fn raw_excerpt(&self, max_chars: usize) -> String {
        self.raw.chars().take(max_chars).collect()
    }
}
