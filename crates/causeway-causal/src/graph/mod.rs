//! Directed graph over free-text causal nodes.

pub mod paths;
pub mod reachability;
pub mod text_graph;

pub use paths::maximal_paths;
pub use reachability::reachable_count;
pub use text_graph::{normalize_node, CausalTextGraph, LinkWeight, TextNode};
