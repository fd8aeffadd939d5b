use serde::{Deserialize, Serialize};

use super::defaults;

/// Cohort driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Process independent subjects on the rayon pool.
    pub parallel_subjects: bool,
    /// Zero-padded width of generated participant numbers (`P_007`).
    pub participant_id_width: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            parallel_subjects: defaults::DEFAULT_PARALLEL_SUBJECTS,
            participant_id_width: defaults::DEFAULT_PARTICIPANT_ID_WIDTH,
        }
    }
}
