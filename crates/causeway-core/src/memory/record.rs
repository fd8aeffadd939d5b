use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::RECORD_EXTENSION;
use crate::errors::CausewayError;

/// How a record absorbs an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Each update replaces the stored body wholesale.
    Singleton,
    /// Each update is appended under a session header; nothing is discarded.
    AppendLog,
}

/// Every record a subject can hold. The set is closed: adding a kind is a migration.
///
/// Variants are declared in name order so `Ord` matches the context-blob order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordName {
    Assessment,
    InterventionsTested,
    ProtocolEvolution,
    Sessions,
    TherapeuticGoals,
}

impl RecordName {
    /// All records, in name order.
    pub const ALL: [RecordName; 5] = [
        Self::Assessment,
        Self::InterventionsTested,
        Self::ProtocolEvolution,
        Self::Sessions,
        Self::TherapeuticGoals,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assessment => "assessment",
            Self::InterventionsTested => "interventions_tested",
            Self::ProtocolEvolution => "protocol_evolution",
            Self::Sessions => "sessions",
            Self::TherapeuticGoals => "therapeutic_goals",
        }
    }

    /// Merge policy, fixed per record.
    pub fn kind(self) -> RecordKind {
        match self {
            Self::Assessment => RecordKind::Singleton,
            Self::InterventionsTested
            | Self::ProtocolEvolution
            | Self::Sessions
            | Self::TherapeuticGoals => RecordKind::AppendLog,
        }
    }

    /// Body written on first contact with a subject.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Assessment => "# Clinical Assessment\n\n(To be populated in first session)",
            Self::InterventionsTested => "# Interventions & Outcomes\n\n",
            Self::ProtocolEvolution => {
                "# Protocol Evolution Log\n\nHow the therapeutic approach has evolved:"
            }
            Self::Sessions => "# Session Notes\n\n",
            Self::TherapeuticGoals => "# Therapeutic Goals\n\n(Will evolve based on sessions)",
        }
    }

    /// File name used by file-backed stores, e.g. `sessions.md`.
    pub fn file_name(self) -> String {
        format!("{}.{RECORD_EXTENSION}", self.as_str())
    }

    /// Accepts `sessions` or `sessions.md`, case-insensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        let stem = label
            .strip_suffix(&format!(".{RECORD_EXTENSION}"))
            .unwrap_or(&label);
        Self::ALL.into_iter().find(|r| r.as_str() == stem)
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordName {
    type Err = CausewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| CausewayError::UnknownRecord {
            name: s.to_string(),
        })
    }
}
