//! Per-link confidence and its chain-level aggregate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::CausalChain;
use crate::errors::CausewayError;

/// Confidence assigned to one consecutive node pair of a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEvaluation {
    /// `"A→B"`, regenerated from the chain's own nodes.
    pub connection: String,
    /// Always within `[0.0, 1.0]`.
    pub confidence: f64,
    pub evidence: String,
}

/// Scored chain. `links.len() == chain.link_count()` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainEvaluation {
    pub chain: CausalChain,
    pub links: Vec<LinkEvaluation>,
    /// Deterministic aggregate of the link confidences.
    pub overall_confidence: f64,
    /// Figure the collaborator reported, kept for diagnostics only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_overall_confidence: Option<f64>,
}

impl ChainEvaluation {
    /// Assemble an evaluation, enforcing one link per node pair and in-range scores.
    pub fn new(
        chain: CausalChain,
        links: Vec<LinkEvaluation>,
        reported_overall_confidence: Option<f64>,
    ) -> Result<Self, CausewayError> {
        if links.len() != chain.link_count() {
            return Err(CausewayError::InvalidInput {
                reason: format!(
                    "chain {chain} has {} links but {} evaluations",
                    chain.link_count(),
                    links.len()
                ),
            });
        }
        if let Some(bad) = links
            .iter()
            .find(|l| !l.confidence.is_finite() || !(0.0..=1.0).contains(&l.confidence))
        {
            return Err(CausewayError::InvalidInput {
                reason: format!(
                    "confidence {} for {} is outside [0, 1]",
                    bad.confidence, bad.connection
                ),
            });
        }
        let scores: Vec<f64> = links.iter().map(|l| l.confidence).collect();
        Ok(Self {
            overall_confidence: aggregate_link_confidence(&scores),
            chain,
            links,
            reported_overall_confidence,
        })
    }
}

/// Chain-level confidence: `0.6 * min + 0.4 * mean` of link confidences.
///
/// Monotone in every link; the weakest link dominates. Empty input scores 0.
pub fn aggregate_link_confidence(link_confidences: &[f64]) -> f64 {
    if link_confidences.is_empty() {
        return 0.0;
    }
    let min = link_confidences
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let mean = link_confidences.iter().sum::<f64>() / link_confidences.len() as f64;
    (0.6 * min + 0.4 * mean).clamp(0.0, 1.0)
}

/// Stable chain identifier: `chain_1` is the first chain in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainKey(usize);

impl ChainKey {
    const PREFIX: &'static str = "chain_";

    /// Key for the chain at zero-based `index`.
    pub fn from_index(index: usize) -> Self {
        Self(index + 1)
    }

    /// Zero-based position in the input chain list.
    pub fn index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for ChainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for ChainKey {
    type Err = CausewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .strip_prefix(Self::PREFIX)
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .map(Self)
            .ok_or_else(|| CausewayError::InvalidInput {
                reason: format!("not a chain key: {s:?}"),
            })
    }
}

impl Serialize for ChainKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChainKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(confidence: f64) -> LinkEvaluation {
        LinkEvaluation {
            connection: "A→B".into(),
            confidence,
            evidence: String::new(),
        }
    }

    #[test]
    fn aggregate_weights_minimum() {
        let score = aggregate_link_confidence(&[0.9, 0.5]);
        assert!((score - (0.6 * 0.5 + 0.4 * 0.7)).abs() < 1e-9);
    }

    #[test]
    fn aggregate_of_uniform_links_is_that_value() {
        assert!((aggregate_link_confidence(&[0.8, 0.8, 0.8]) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn evaluation_rejects_link_count_mismatch() {
        let chain = CausalChain::parse("A → B → C").unwrap();
        assert!(ChainEvaluation::new(chain, vec![link(0.9)], None).is_err());
    }

    #[test]
    fn evaluation_rejects_out_of_range() {
        let chain = CausalChain::parse("A → B").unwrap();
        assert!(ChainEvaluation::new(chain.clone(), vec![link(1.2)], None).is_err());
        assert!(ChainEvaluation::new(chain, vec![link(f64::NAN)], None).is_err());
    }

    #[test]
    fn chain_keys_order_numerically() {
        let mut keys: Vec<ChainKey> = ["chain_10", "chain_2", "chain_1"]
            .iter()
            .map(|k| k.parse().unwrap())
            .collect();
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["chain_1", "chain_2", "chain_10"]);
        assert!("chain_0".parse::<ChainKey>().is_err());
        assert!("links".parse::<ChainKey>().is_err());
    }
}
