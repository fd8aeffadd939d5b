//! Prompt templates for the four stages. Wording is not part of any contract;
//! only the reply shapes the stages parse are.

use std::collections::BTreeMap;

use causeway_core::{CausalChain, CausalPair, ChainEvaluation, ChainKey};

/// Evidence rubric shared by the confidence prompt and its tests.
pub const CONFIDENCE_RUBRIC: &str = "\
- 0.9-1.0: explicit statement (\"because X, I feel Y\")
- 0.7-0.9: clear temporal or logical sequence
- 0.5-0.7: implied connection that needs inference
- 0.3-0.5: weak connection that needs substantial reasoning
- below 0.3: speculative or unsupported";

pub fn pairs_prompt(transcript: &str) -> String {
    format!(
        r#"Analyze this interview transcript and extract ALL cause-effect pairs.

TRANSCRIPT:
{transcript}

Return ONLY valid JSON with this structure:
{{
  "pairs": [
    {{"cause": "specific cause phrase", "effect": "specific effect phrase", "explicit": true}}
  ]
}}

Include explicit causal statements ("because...") and implicit ones
(temporal or logical connections). Use the speaker's own phrases."#
    )
}

pub fn chains_prompt(pairs: &[CausalPair]) -> String {
    let listed = pairs
        .iter()
        .map(|p| format!("- {p}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"Given these causal relationships, compose longer causal chains.

CAUSAL RELATIONSHIPS:
{listed}

Connect pairs that share a phrase: A → B and B → C become "A → B → C".
Each chain must follow a logical sequence and use phrases from the list above.

Return a numbered list, one chain per line:
1. A → B → C
2. ..."#
    )
}

pub fn confidence_prompt(transcript: &str, chains: &[CausalChain]) -> String {
    let listed = chains
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}: {c}", ChainKey::from_index(i)))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"For each causal chain, score every link against the transcript.

TRANSCRIPT:
{transcript}

CAUSAL CHAINS:
{listed}

For EACH consecutive link in EACH chain give a confidence in [0, 1] and the
supporting evidence (a direct quote or your reasoning). Criteria:
{CONFIDENCE_RUBRIC}

Return JSON keyed by chain id, one entry per link in chain order:
{{
  "chain_1": {{
    "links": [
      {{"connection": "A→B", "confidence": 0.95, "evidence": "exact quote"}},
      {{"connection": "B→C", "confidence": 0.78, "evidence": "reasoning"}}
    ],
    "overall_confidence": 0.86
  }}
}}"#
    )
}

pub fn interventions_prompt(
    chains: &[CausalChain],
    evaluations: &BTreeMap<ChainKey, ChainEvaluation>,
) -> String {
    let chains_json = serde_json::to_string_pretty(chains).unwrap_or_else(|_| "[]".to_string());
    let scores_json =
        serde_json::to_string_pretty(evaluations).unwrap_or_else(|_| "{}".to_string());
    format!(
        r#"Analyze these causal chains and identify the highest-ROI intervention points.

CHAINS:
{chains_json}

CONFIDENCE SCORES:
{scores_json}

Pick the 2-3 links where intervening would have the most impact:
1. high confidence (0.8+): the link clearly exists
2. modifiable: a person can act on it (not "stop the climate crisis")
3. leverage: breaking it blocks downstream effects
4. feasible: concrete interventions exist

Return JSON:
{{
  "highest_roi_interventions": [
    {{
      "link": "A → B",
      "confidence": 0.9,
      "roi_score": 0.92,
      "modifiability": "high",
      "leverage_blocked_effects": 3,
      "suggested_interventions": ["therapy", "sleep protocol", "peer support"],
      "reasoning": "why this link"
    }}
  ]
}}"#
    )
}
