//! Deterministic composition of maximal simple paths.

use std::collections::HashSet;

use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use super::CausalTextGraph;

/// Maximal simple paths of at least two nodes, in node-insertion order.
///
/// Paths start at nodes with no incoming edge; if every node has one (a pure
/// cycle), every node is a start. A path ends when it has no unvisited
/// successor or reaches `max_depth` nodes. At most `max_paths` are returned.
pub fn maximal_paths(graph: &CausalTextGraph, max_depth: usize, max_paths: usize) -> Vec<Vec<String>> {
    let mut nodes: Vec<NodeIndex> = graph.graph.node_indices().collect();
    nodes.sort();

    let roots: Vec<NodeIndex> = nodes
        .iter()
        .copied()
        .filter(|&n| {
            graph
                .graph
                .neighbors_directed(n, Direction::Incoming)
                .next()
                .is_none()
        })
        .collect();
    let starts = if roots.is_empty() { nodes } else { roots };

    let mut paths = Vec::new();
    for start in starts {
        if paths.len() >= max_paths {
            break;
        }
        let mut path = vec![start];
        let mut on_path = HashSet::from([start]);
        walk(graph, &mut path, &mut on_path, max_depth, max_paths, &mut paths);
    }
    paths
}

fn walk(
    graph: &CausalTextGraph,
    path: &mut Vec<NodeIndex>,
    on_path: &mut HashSet<NodeIndex>,
    max_depth: usize,
    max_paths: usize,
    out: &mut Vec<Vec<String>>,
) {
    if out.len() >= max_paths {
        return;
    }
    let Some(&current) = path.last() else {
        return;
    };

    let mut next: Vec<NodeIndex> = graph
        .graph
        .neighbors_directed(current, Direction::Outgoing)
        .filter(|n| !on_path.contains(n))
        .collect();
    next.sort();

    if next.is_empty() || path.len() >= max_depth {
        if path.len() >= 2 {
            let labels = path
                .iter()
                .filter_map(|&idx| graph.label(idx).map(str::to_string))
                .collect();
            out.push(labels);
        }
        return;
    }

    for neighbor in next {
        path.push(neighbor);
        on_path.insert(neighbor);
        walk(graph, path, on_path, max_depth, max_paths, out);
        on_path.remove(&neighbor);
        path.pop();
    }
}
