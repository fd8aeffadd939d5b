//! petgraph::StableGraph wrapper keyed by normalized node text.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;

use causeway_core::{CausalChain, CausalPair};

/// A node: one distinct cause or effect phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    /// Phrase as first seen.
    pub label: String,
}

/// Weight on a causal edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkWeight {
    /// How many pairs or chains asserted this edge.
    pub support: u32,
}

pub type TextStableGraph = StableGraph<TextNode, LinkWeight, Directed>;

/// Causal graph with O(1) lookup by normalized phrase.
///
/// Self-loops are never added. Cycles are allowed: transcripts describe
/// feedback loops ("it's a cycle that keeps feeding itself").
#[derive(Debug, Clone)]
pub struct CausalTextGraph {
    pub graph: TextStableGraph,
    /// Map from normalized phrase → NodeIndex.
    pub node_index: HashMap<String, NodeIndex>,
}

impl CausalTextGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Graph of every well-formed pair.
    pub fn from_pairs(pairs: &[CausalPair]) -> Self {
        let mut graph = Self::new();
        for pair in pairs.iter().filter(|p| p.is_well_formed()) {
            graph.add_link(&pair.cause, &pair.effect);
        }
        graph
    }

    /// Graph of every consecutive node pair of every chain.
    pub fn from_chains(chains: &[CausalChain]) -> Self {
        let mut graph = Self::new();
        for chain in chains {
            for (cause, effect) in chain.links() {
                graph.add_link(cause, effect);
            }
        }
        graph
    }

    /// Get or create the node for a phrase.
    pub fn ensure_node(&mut self, label: &str) -> NodeIndex {
        let key = normalize_node(label);
        if let Some(&idx) = self.node_index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(TextNode {
            label: label.trim().to_string(),
        });
        self.node_index.insert(key, idx);
        idx
    }

    /// Add or reinforce `cause → effect`. Returns false for self-loops.
    pub fn add_link(&mut self, cause: &str, effect: &str) -> bool {
        let from = self.ensure_node(cause);
        let to = self.ensure_node(effect);
        if from == to {
            return false;
        }
        match self.graph.find_edge(from, to) {
            Some(edge) => {
                if let Some(weight) = self.graph.edge_weight_mut(edge) {
                    weight.support += 1;
                }
            }
            None => {
                self.graph.add_edge(from, to, LinkWeight { support: 1 });
            }
        }
        true
    }

    pub fn get_node(&self, label: &str) -> Option<NodeIndex> {
        self.node_index.get(&normalize_node(label)).copied()
    }

    pub fn has_link(&self, cause: &str, effect: &str) -> bool {
        match (self.get_node(cause), self.get_node(effect)) {
            (Some(from), Some(to)) => self.graph.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    pub fn label(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|n| n.label.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for CausalTextGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Case- and whitespace-insensitive identity of a phrase.
pub fn normalize_node(label: &str) -> String {
    label
        .trim()
        .trim_end_matches(&['.', ',', ';', '!'][..])
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
