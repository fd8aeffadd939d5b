//! Ranked intervention points.

use serde::{Deserialize, Serialize};

/// How plausibly a human intervention can change a causal link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifiability {
    Low,
    Medium,
    High,
}

impl Modifiability {
    /// Contribution of this level to the ROI score.
    pub fn weight(self) -> f64 {
        match self {
            Self::Low => 0.1,
            Self::Medium => 0.5,
            Self::High => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Lenient parse of collaborator labels ("High", "moderate", "not modifiable").
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "high" | "highly modifiable" | "very high" => Some(Self::High),
            "medium" | "moderate" | "mid" => Some(Self::Medium),
            "low" | "none" | "not modifiable" | "immutable" | "very low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// A causal link scored for actionability and leverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionCandidate {
    /// `"cause → effect"`.
    pub link: String,
    pub confidence: f64,
    pub roi_score: f64,
    pub modifiability: Modifiability,
    /// Effects transitively gated by this link.
    pub leverage_blocked_effects: u32,
    /// Deduplicated, in the order the collaborator listed them.
    pub suggested_interventions: Vec<String>,
    pub reasoning: String,
    /// Figure the collaborator reported, kept for diagnostics only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_roi_score: Option<f64>,
}

/// Stage 4 output, highest ROI first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterventionRecommendations {
    pub highest_roi_interventions: Vec<InterventionCandidate>,
}

impl InterventionRecommendations {
    pub fn is_empty(&self) -> bool {
        self.highest_roi_interventions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.highest_roi_interventions.len()
    }

    /// The top-ranked candidate, if any.
    pub fn best(&self) -> Option<&InterventionCandidate> {
        self.highest_roi_interventions.first()
    }
}
