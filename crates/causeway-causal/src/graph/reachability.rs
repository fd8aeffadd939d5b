//! Forward reachability: how much of the graph sits downstream of a node.

use std::collections::{HashSet, VecDeque};

use petgraph::Direction;

use super::CausalTextGraph;

/// Nodes reachable from `label` by outgoing edges, counting `label` itself.
///
/// `None` when the phrase is not in the graph.
pub fn reachable_count(graph: &CausalTextGraph, label: &str) -> Option<usize> {
    let start = graph.get_node(label)?;

    let mut visited = HashSet::new();
    visited.insert(start);
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for neighbor in graph.graph.neighbors_directed(current, Direction::Outgoing) {
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    Some(visited.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_downstream_including_start() {
        let mut graph = CausalTextGraph::new();
        graph.add_link("news", "anxiety");
        graph.add_link("anxiety", "insomnia");
        graph.add_link("anxiety", "irritability");
        assert_eq!(reachable_count(&graph, "news"), Some(4));
        assert_eq!(reachable_count(&graph, "anxiety"), Some(3));
        assert_eq!(reachable_count(&graph, "insomnia"), Some(1));
        assert_eq!(reachable_count(&graph, "weather"), None);
    }

    #[test]
    fn cycles_terminate() {
        let mut graph = CausalTextGraph::new();
        graph.add_link("worry", "insomnia");
        graph.add_link("insomnia", "worry");
        assert_eq!(reachable_count(&graph, "worry"), Some(2));
    }
}
