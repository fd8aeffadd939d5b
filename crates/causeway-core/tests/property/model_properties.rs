use causeway_core::models::{aggregate_link_confidence, CausalChain};
use proptest::prelude::*;

proptest! {
    #[test]
    fn aggregate_stays_between_min_and_mean(scores in prop::collection::vec(0.0f64..=1.0, 1..8)) {
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        let agg = aggregate_link_confidence(&scores);
        prop_assert!(agg >= min - 1e-9);
        prop_assert!(agg <= mean + 1e-9);
    }

    #[test]
    fn aggregate_is_monotone(
        scores in prop::collection::vec(0.0f64..=1.0, 1..8),
        idx in 0usize..8,
        bump in 0.0f64..=1.0,
    ) {
        let i = idx % scores.len();
        let mut raised = scores.clone();
        raised[i] = (raised[i] + bump).min(1.0);
        prop_assert!(aggregate_link_confidence(&raised) + 1e-12 >= aggregate_link_confidence(&scores));
    }

    #[test]
    fn parsed_chains_never_have_blank_nodes(
        nodes in prop::collection::vec("[a-z]{1,8}( [a-z]{1,8})?", 2..6)
    ) {
        let text = nodes.join(" -> ");
        let chain = CausalChain::parse(&text).unwrap();
        prop_assert_eq!(chain.len(), nodes.len());
        prop_assert_eq!(chain.link_count(), nodes.len() - 1);
        prop_assert!(chain.nodes().iter().all(|n| !n.trim().is_empty()));
    }
}
