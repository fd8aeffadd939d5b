use std::fmt;

use serde::{Deserialize, Serialize};

/// A single asserted or inferred cause→effect relationship.
///
/// Pairs are never deduplicated: a repeated pair signals salience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausalPair {
    pub cause: String,
    pub effect: String,
    /// True when the transcript states the relationship outright.
    #[serde(default)]
    pub explicit: bool,
}

impl CausalPair {
    pub fn new(cause: impl Into<String>, effect: impl Into<String>, explicit: bool) -> Self {
        Self {
            cause: cause.into(),
            effect: effect.into(),
            explicit,
        }
    }

    /// Both endpoints carry text.
    pub fn is_well_formed(&self) -> bool {
        !self.cause.trim().is_empty() && !self.effect.trim().is_empty()
    }
}

impl fmt::Display for CausalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.cause, self.effect)
    }
}
