use std::collections::BTreeMap;

use causeway_causal::graph::{maximal_paths, reachable_count, CausalTextGraph};
use causeway_causal::scoring::roi_score;
use causeway_causal::stages::interventions::{finalize, RankingContext};
use causeway_core::{CausalChain, Modifiability};
use proptest::prelude::*;
use serde_json::json;

fn modifiability() -> impl Strategy<Value = Modifiability> {
    prop_oneof![
        Just(Modifiability::Low),
        Just(Modifiability::Medium),
        Just(Modifiability::High),
    ]
}

proptest! {
    #[test]
    fn roi_is_bounded(
        confidence in 0.0f64..=1.0,
        m in modifiability(),
        leverage in 0u32..1000,
        suggestions in 0usize..20,
    ) {
        let score = roi_score(confidence, m, leverage, suggestions);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn roi_is_monotone_in_confidence(
        low in 0.0f64..=1.0,
        bump in 0.0f64..=1.0,
        m in modifiability(),
        leverage in 0u32..10,
    ) {
        let high = (low + bump).min(1.0);
        prop_assert!(roi_score(high, m, leverage, 1) >= roi_score(low, m, leverage, 1));
    }

    #[test]
    fn composed_paths_are_valid_chains(
        edges in prop::collection::vec((0u8..8, 0u8..8), 1..20)
    ) {
        let mut graph = CausalTextGraph::new();
        for (a, b) in &edges {
            graph.add_link(&format!("n{a}"), &format!("n{b}"));
        }
        for path in maximal_paths(&graph, 8, 50) {
            prop_assert!(path.len() >= 2);
            prop_assert!(path.len() <= 8);
            let chain = CausalChain::new(path.clone());
            prop_assert!(chain.is_ok());
            for window in path.windows(2) {
                prop_assert!(graph.has_link(&window[0], &window[1]));
            }
        }
    }

    #[test]
    fn reachability_counts_start(edges in prop::collection::vec((0u8..6, 0u8..6), 1..12)) {
        let mut graph = CausalTextGraph::new();
        for (a, b) in &edges {
            graph.add_link(&format!("n{a}"), &format!("n{b}"));
        }
        for (a, _) in &edges {
            let count = reachable_count(&graph, &format!("n{a}")).unwrap();
            prop_assert!(count >= 1);
            prop_assert!(count <= graph.node_count());
        }
    }

    #[test]
    fn ranking_never_exceeds_three_or_drops_below_floor(
        confidences in prop::collection::vec(0.0f64..=1.0, 0..10)
    ) {
        let context = RankingContext::new(&[], &BTreeMap::new());
        let candidates = confidences
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                context.score(&json!({"link": format!("x{i} → y{i}"), "confidence": c}), 0.8)
            })
            .collect();
        let ranked = finalize(candidates, 10);
        prop_assert!(ranked.len() <= 3);
        prop_assert!(ranked.highest_roi_interventions.iter().all(|c| c.confidence >= 0.8));
    }
}
