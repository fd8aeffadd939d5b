use serde::{Deserialize, Serialize};

/// Per-call knobs handed to the reasoning service.
///
/// The core never interprets these; they are delegated as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Upper bound on the reply size, in tokens.
    pub max_output_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// Optional system instruction sent alongside the prompt.
    pub system: Option<String>,
}

impl GenerationOptions {
    /// Low-randomness options for precision-sensitive calls.
    pub fn precise(max_output_tokens: u32) -> Self {
        Self {
            max_output_tokens,
            temperature: 0.3,
            system: None,
        }
    }

    /// Options with an explicit temperature.
    pub fn with_temperature(max_output_tokens: u32, temperature: f64) -> Self {
        Self {
            max_output_tokens,
            temperature,
            system: None,
        }
    }

    /// Attach a system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::precise(1000)
    }
}
