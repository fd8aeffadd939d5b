use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::GenerationOptions;

/// Memory store and session agent configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Root directory of the file-backed store.
    pub root_dir: String,
    /// Options for the session reply.
    pub session: GenerationOptions,
    /// Options for the protocol summary.
    pub summary: GenerationOptions,
    /// Options for the journal export.
    pub journal: GenerationOptions,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            root_dir: defaults::DEFAULT_MEMORY_ROOT.to_string(),
            session: GenerationOptions::with_temperature(
                defaults::DEFAULT_SESSION_MAX_TOKENS,
                defaults::DEFAULT_SESSION_TEMPERATURE,
            ),
            summary: GenerationOptions::with_temperature(
                defaults::DEFAULT_SUMMARY_MAX_TOKENS,
                defaults::DEFAULT_SUMMARY_TEMPERATURE,
            ),
            journal: GenerationOptions::with_temperature(
                defaults::DEFAULT_JOURNAL_MAX_TOKENS,
                defaults::DEFAULT_JOURNAL_TEMPERATURE,
            ),
        }
    }
}
