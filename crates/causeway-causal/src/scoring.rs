//! Deterministic intervention ROI.

use causeway_core::Modifiability;

/// Suggestions beyond this count add nothing to feasibility.
pub const FEASIBILITY_SATURATION: usize = 3;

const CONFIDENCE_WEIGHT: f64 = 0.4;
const MODIFIABILITY_WEIGHT: f64 = 0.3;
const LEVERAGE_WEIGHT: f64 = 0.2;
const FEASIBILITY_WEIGHT: f64 = 0.1;

/// `0.4·confidence + 0.3·modifiability + 0.2·leverage + 0.1·feasibility`, in `[0, 1]`.
///
/// Leverage saturates as `1 − 1/(1 + blocked_effects)`; feasibility as
/// `min(1, suggestions / 3)`.
pub fn roi_score(
    confidence: f64,
    modifiability: Modifiability,
    blocked_effects: u32,
    suggestion_count: usize,
) -> f64 {
    let leverage = 1.0 - 1.0 / (1.0 + f64::from(blocked_effects));
    let feasibility =
        (suggestion_count as f64 / FEASIBILITY_SATURATION as f64).min(1.0);
    let score = CONFIDENCE_WEIGHT * confidence.clamp(0.0, 1.0)
        + MODIFIABILITY_WEIGHT * modifiability.weight()
        + LEVERAGE_WEIGHT * leverage
        + FEASIBILITY_WEIGHT * feasibility;
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiable_link_outranks_immutable_one() {
        let sleep = roi_score(0.85, Modifiability::High, 1, 3);
        let news = roi_score(0.9, Modifiability::Low, 2, 2);
        assert!((sleep - 0.84).abs() < 1e-9);
        assert!(sleep > news);
    }

    #[test]
    fn perfect_inputs_approach_one() {
        let score = roi_score(1.0, Modifiability::High, u32::MAX, 10);
        assert!(score <= 1.0);
        assert!(score > 0.99);
    }

    #[test]
    fn zero_leverage_and_suggestions() {
        let score = roi_score(0.8, Modifiability::Medium, 0, 0);
        assert!((score - (0.32 + 0.15)).abs() < 1e-9);
    }
}
