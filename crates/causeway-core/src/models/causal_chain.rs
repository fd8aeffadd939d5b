//! Ordered causal path of two or more nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CHAIN_DELIMITERS, CHAIN_DISPLAY_DELIMITER, LINK_DISPLAY_DELIMITER, MIN_CHAIN_NODES,
};
use crate::errors::CausewayError;

/// Characters stripped from both ends of every parsed node.
const NODE_TRIM: &[char] = &[
    '"', '\'', '`', '“', '”', '‘', '’', '[', ']', '*', '.', ',', ';', '-',
];

/// A directed path `A → B → C`. Always holds at least two nodes.
///
/// Serialized as its display string so reports stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CausalChain {
    nodes: Vec<String>,
}

impl CausalChain {
    /// Build a chain from nodes, cleaning each the same way [`Self::parse`] does.
    ///
    /// Rejects blank nodes and nodes that themselves contain a directional
    /// delimiter, so every chain reads back identically from its display string.
    pub fn new(nodes: Vec<String>) -> Result<Self, CausewayError> {
        let nodes: Vec<String> = nodes.iter().map(|n| clean_node(n)).collect();
        if nodes.len() < MIN_CHAIN_NODES {
            return Err(CausewayError::InvalidInput {
                reason: format!(
                    "causal chain needs at least {MIN_CHAIN_NODES} nodes, got {}",
                    nodes.len()
                ),
            });
        }
        if nodes.iter().any(|n| n.is_empty()) {
            return Err(CausewayError::InvalidInput {
                reason: "causal chain contains an empty node".to_string(),
            });
        }
        if let Some(bad) = nodes
            .iter()
            .find(|n| CHAIN_DELIMITERS.iter().any(|d| n.contains(d)))
        {
            return Err(CausewayError::InvalidInput {
                reason: format!("causal chain node {bad:?} contains a directional delimiter"),
            });
        }
        Ok(Self { nodes })
    }

    /// Parse untrusted chain text such as `"news → anxiety -> insomnia"`.
    ///
    /// Returns `None` when the text does not split into at least two
    /// non-empty nodes. A malformed string is rejected whole.
    pub fn parse(text: &str) -> Option<Self> {
        let nodes = split_directional(text)?;
        Self::new(nodes).ok()
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of consecutive node pairs.
    pub fn link_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Consecutive `(cause, effect)` node pairs.
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.nodes
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
    }

    /// Compact `"A→B"` labels, one per link.
    pub fn link_labels(&self) -> Vec<String> {
        self.links()
            .map(|(cause, effect)| format!("{cause}{LINK_DISPLAY_DELIMITER}{effect}"))
            .collect()
    }
}

impl fmt::Display for CausalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nodes.join(CHAIN_DISPLAY_DELIMITER))
    }
}

impl TryFrom<String> for CausalChain {
    type Error = CausewayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| CausewayError::InvalidInput {
            reason: format!("not a causal chain: {value:?}"),
        })
    }
}

impl From<CausalChain> for String {
    fn from(chain: CausalChain) -> Self {
        chain.to_string()
    }
}

/// Split text on any accepted directional delimiter.
///
/// Returns `None` if there is no delimiter at all or any segment is blank
/// after trimming.
pub fn split_directional(text: &str) -> Option<Vec<String>> {
    let mut normalized = text.to_string();
    for delimiter in CHAIN_DELIMITERS.iter().skip(1) {
        normalized = normalized.replace(delimiter, CHAIN_DELIMITERS[0]);
    }
    if !normalized.contains(CHAIN_DELIMITERS[0]) {
        return None;
    }

    let mut nodes = Vec::new();
    for segment in normalized.split(CHAIN_DELIMITERS[0]) {
        let node = clean_node(segment);
        if node.is_empty() {
            return None;
        }
        nodes.push(node);
    }
    Some(nodes)
}

fn clean_node(segment: &str) -> String {
    segment
        .trim()
        .trim_matches(|c: char| c.is_whitespace() || NODE_TRIM.contains(&c))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_delimiters() {
        let chain = CausalChain::parse("climate news -> anxiety → insomnia => work decline").unwrap();
        assert_eq!(
            chain.nodes(),
            ["climate news", "anxiety", "insomnia", "work decline"]
        );
        assert_eq!(chain.link_count(), 3);
    }

    #[test]
    fn keeps_inner_apostrophes() {
        let chain = CausalChain::parse("\"anxious\" → can't sleep.").unwrap();
        assert_eq!(chain.nodes(), ["anxious", "can't sleep"]);
    }

    #[test]
    fn rejects_single_node_and_blank_segments() {
        assert!(CausalChain::parse("just anxiety").is_none());
        assert!(CausalChain::parse("A → → B").is_none());
        assert!(CausalChain::parse("A →").is_none());
    }

    #[test]
    fn serializes_as_display_string() {
        let chain = CausalChain::parse("A -> B").unwrap();
        let json = serde_json::to_string(&chain).unwrap();
        assert_eq!(json, "\"A → B\"");
        let back: CausalChain = serde_json::from_str(&json).unwrap();
        assert_eq!(back, chain);
    }

    #[test]
    fn new_cleans_nodes_like_parse() {
        let chain = CausalChain::new(vec!["  news about wildfires ".into(), "anxious.".into()]).unwrap();
        assert_eq!(chain.nodes(), ["news about wildfires", "anxious"]);
        let back: CausalChain = serde_json::from_str(&serde_json::to_string(&chain).unwrap()).unwrap();
        assert_eq!(back, chain);
    }

    #[test]
    fn new_rejects_nodes_holding_delimiters() {
        assert!(CausalChain::new(vec!["anxious".into(), "sleep -> wake cycle".into()]).is_err());
        assert!(CausalChain::new(vec!["a ⟶ b".into(), "c".into()]).is_err());
        assert!(CausalChain::new(vec!["a".into(), " ... ".into()]).is_err());
    }

    #[test]
    fn link_labels_are_compact() {
        let chain = CausalChain::parse("A → B → C").unwrap();
        assert_eq!(chain.link_labels(), ["A→B", "B→C"]);
    }
}
