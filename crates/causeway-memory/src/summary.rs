//! Structured digest of a subject's protocol, as returned by the collaborator.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Protocol digest. List fields default to empty when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolDigest {
    #[serde(deserialize_with = "lenient_count")]
    pub sessions_completed: u32,
    pub clinical_pattern: String,
    #[serde(default)]
    pub what_works: Vec<String>,
    #[serde(default)]
    pub what_doesnt_work: Vec<String>,
    #[serde(default)]
    pub current_therapeutic_approach: String,
    #[serde(default)]
    pub recommended_next_steps: Vec<String>,
    #[serde(default)]
    pub breakthrough_moments: Vec<String>,
    /// Free-form; numbers such as `2` are kept as `"2"`.
    #[serde(default, deserialize_with = "lenient_text")]
    pub protocol_version: String,
}

/// Digest, or the collaborator's raw reply when it did not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProtocolSummary {
    Digest(ProtocolDigest),
    Raw { raw: String },
}

impl ProtocolSummary {
    pub fn digest(&self) -> Option<&ProtocolDigest> {
        match self {
            Self::Digest(digest) => Some(digest),
            Self::Raw { .. } => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw { .. })
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let count = match &value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    count
        .and_then(|c| u32::try_from(c).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("not a session count: {value}")))
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
