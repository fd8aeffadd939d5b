use std::sync::Arc;

use causeway_causal::CausalPipeline;
use causeway_core::config::PipelineConfig;
use causeway_core::models::PipelineStage;
use causeway_core::{AnalysisOutcome, CausewayError, IReasoningService};
use serde_json::json;
use test_fixtures::{ScriptedReasoner, ScriptedReply};

const TRANSCRIPT: &str = "News about wildfires makes me anxious, so I can't sleep";

fn pipeline_with(service: ScriptedReasoner, config: PipelineConfig) -> (Arc<ScriptedReasoner>, CausalPipeline) {
    let service = Arc::new(service);
    let shared: Arc<dyn IReasoningService> = service.clone();
    (service, CausalPipeline::new(shared, config))
}

fn pipeline(replies: &[&str]) -> (Arc<ScriptedReasoner>, CausalPipeline) {
    pipeline_with(
        ScriptedReasoner::with_replies("scripted-model", replies.iter().copied()),
        PipelineConfig::default(),
    )
}

fn two_pairs() -> String {
    json!({"pairs": [
        {"cause": "news about wildfires", "effect": "anxious", "explicit": true},
        {"cause": "anxious", "effect": "can't sleep", "explicit": true}
    ]})
    .to_string()
}

fn scored_chain() -> String {
    json!({"chain_1": {"links": [
        {"connection": "x", "confidence": 0.9, "evidence": "a"},
        {"connection": "y", "confidence": 0.85, "evidence": "b"}
    ]}})
    .to_string()
}

#[test]
fn zero_pairs_short_circuits_after_one_call() {
    let (service, pipeline) = pipeline(&[r#"{"pairs": []}"#]);
    let outcome = pipeline.analyze(TRANSCRIPT).unwrap();

    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({"error": "No causal pairs found"})
    );
    assert_eq!(service.call_count(), 1);
}

#[test]
fn unparseable_pairs_reply_degrades_to_no_pairs() {
    let (service, pipeline) = pipeline(&["I'm sorry, I can't find any relationships here."]);
    let outcome = pipeline.analyze(TRANSCRIPT).unwrap();

    assert!(matches!(outcome, AnalysisOutcome::NoCausalPairs { .. }));
    assert_eq!(service.call_count(), 1);
    let degradations = pipeline.degradations();
    assert_eq!(degradations.len(), 1);
    assert_eq!(degradations[0].component, "pair_extraction");
}

#[test]
fn empty_transcript_is_rejected_without_calls() {
    let (service, pipeline) = pipeline(&[]);
    let err = pipeline.analyze("   \n").unwrap_err();
    assert!(matches!(err, CausewayError::InvalidInput { .. }));
    assert_eq!(service.call_count(), 0);
}

#[test]
fn stage_one_service_failure_is_an_error() {
    let (_, pipeline) = pipeline_with(
        ScriptedReasoner::new("scripted-model").fail("connection refused"),
        PipelineConfig::default(),
    );
    let err = pipeline.analyze(TRANSCRIPT).unwrap_err();
    assert!(err.is_service_unavailable());
}

#[test]
fn later_service_failure_aborts_with_partial_report() {
    let service = ScriptedReasoner::new("scripted-model")
        .reply(two_pairs())
        .reply("1. news about wildfires → anxious → can't sleep")
        .fail("rate limited");
    let (service, pipeline) = pipeline_with(service, PipelineConfig::default());

    let outcome = pipeline.analyze(TRANSCRIPT).unwrap();
    match &outcome {
        AnalysisOutcome::Aborted {
            error,
            failed_stage,
            partial,
        } => {
            assert_eq!(*failed_stage, PipelineStage::ConfidenceScoring);
            assert!(error.contains("rate limited"));
            assert_eq!(partial.causal_pairs_found, 2);
            assert_eq!(partial.causal_chains.len(), 1);
            assert!(partial.confidence_analysis.is_empty());
            assert!(partial.intervention_recommendations.is_empty());
        }
        other => panic!("expected Aborted, got {other:?}"),
    }
    assert_eq!(service.call_count(), 3);

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["failed_stage"], "confidence_scoring");
    assert_eq!(json["processing_model"], "scripted-model");
}

#[test]
fn later_stages_run_on_empty_input() {
    let (service, pipeline) = pipeline(&[two_pairs().as_str(), "no list here", "{}", "{}"]);
    let outcome = pipeline.analyze(TRANSCRIPT).unwrap();

    let report = outcome.report().unwrap();
    assert!(outcome.is_complete());
    assert!(report.causal_chains.is_empty());
    assert!(report.confidence_analysis.is_empty());
    assert!(report.intervention_recommendations.is_empty());
    assert_eq!(service.call_count(), 4);
}

#[test]
fn graph_fallback_composes_chains_when_enabled() {
    let config = PipelineConfig {
        graph_fallback: true,
        ..PipelineConfig::default()
    };
    let service = ScriptedReasoner::with_replies(
        "scripted-model",
        [two_pairs(), "no list here".to_string(), scored_chain(), "{}".to_string()],
    );
    let (_, pipeline) = pipeline_with(service, config);

    let outcome = pipeline.analyze(TRANSCRIPT).unwrap();
    let report = outcome.report().unwrap();
    assert_eq!(report.causal_chains.len(), 1);
    assert_eq!(
        report.causal_chains[0].to_string(),
        "news about wildfires → anxious → can't sleep"
    );
    assert_eq!(report.confidence_analysis.len(), 1);
}

#[test]
fn chains_are_capped_and_malformed_items_dropped() {
    let config = PipelineConfig {
        max_chains: 2,
        ..PipelineConfig::default()
    };
    let list = "1. a → b\n2. lonely\n3. b -> c\n4. c => d\n5. → d";
    let service = ScriptedReasoner::with_replies(
        "scripted-model",
        [two_pairs(), list.to_string(), "{}".to_string(), "{}".to_string()],
    );
    let (_, pipeline) = pipeline_with(service, config);

    let outcome = pipeline.analyze(TRANSCRIPT).unwrap();
    let chains: Vec<String> = outcome
        .report()
        .unwrap()
        .causal_chains
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(chains, ["a → b", "b → c"]);
}

#[test]
fn mismatched_link_counts_leave_chain_unscored() {
    let confidence = json!({
        "chain_1": {"links": [{"confidence": 0.9}]},
        "chain_2": {"links": [{"confidence": 0.7}]},
        "chain_3": {"links": [{"confidence": 0.7}]}
    })
    .to_string();
    let (_, pipeline) = pipeline(&[
        two_pairs().as_str(),
        "1. a → b → c\n2. c → d",
        confidence.as_str(),
        "{}",
    ]);

    let outcome = pipeline.analyze(TRANSCRIPT).unwrap();
    let report = outcome.report().unwrap();
    let keys: Vec<String> = report
        .confidence_analysis
        .keys()
        .map(ToString::to_string)
        .collect();
    assert_eq!(keys, ["chain_2"]);
    for (key, evaluation) in &report.confidence_analysis {
        let chain = &report.causal_chains[key.index()];
        assert_eq!(evaluation.links.len(), chain.len() - 1);
    }
}

#[test]
fn out_of_range_confidence_leaves_chain_unscored() {
    let confidence = json!({"chain_1": {"links": [{"confidence": 1.4}]}}).to_string();
    let (_, pipeline) = pipeline(&[two_pairs().as_str(), "1. a → b", confidence.as_str(), "{}"]);
    let outcome = pipeline.analyze(TRANSCRIPT).unwrap();
    assert!(outcome.report().unwrap().confidence_analysis.is_empty());
}

#[test]
fn interventions_respect_floor_and_ceiling() {
    let interventions = json!({"highest_roi_interventions": [
        {"link": "p → q", "confidence": 0.8, "modifiability": "high"},
        {"link": "q → r", "confidence": 0.79999, "modifiability": "high"},
        {"link": "r → s", "confidence": 0.95, "modifiability": "medium"},
        {"link": "s → t", "confidence": 0.9, "modifiability": "low"},
        {"link": "t → u", "confidence": 0.85, "modifiability": "high"}
    ]})
    .to_string();
    let (_, pipeline) = pipeline(&[two_pairs().as_str(), "1. a → b", "{}", interventions.as_str()]);

    let outcome = pipeline.analyze(TRANSCRIPT).unwrap();
    let ranked = &outcome
        .report()
        .unwrap()
        .intervention_recommendations
        .highest_roi_interventions;

    assert_eq!(ranked.len(), 3);
    assert!(ranked.iter().all(|c| c.confidence >= 0.8));
    assert!(ranked.iter().all(|c| c.link != "q → r"));
    assert!(ranked.windows(2).all(|w| w[0].roi_score >= w[1].roi_score));
    assert_eq!(ranked[0].link, "t → u");
}

#[test]
fn report_summary_and_pair_truncation() {
    let pairs: Vec<_> = (0..7)
        .map(|i| json!({"cause": format!("c{i}"), "effect": format!("e{i}")}))
        .collect();
    let pairs_reply = json!({ "pairs": pairs }).to_string();
    let long = "é".repeat(250);
    let (_, pipeline) = pipeline(&[pairs_reply.as_str(), "1. c0 → e0", "{}", "{}"]);

    let outcome = pipeline.analyze(&long).unwrap();
    let report = outcome.report().unwrap();
    assert_eq!(report.causal_pairs_found, 7);
    assert_eq!(report.pairs.len(), 5);
    assert_eq!(report.transcript_summary.chars().count(), 203);
    assert!(report.transcript_summary.ends_with("..."));
    assert_eq!(report.reasoning_depth, "4-step mechanistic causal reasoning");
}

#[test]
fn short_transcript_summary_still_gets_ellipsis() {
    let (_, pipeline) = pipeline(&[two_pairs().as_str(), "1. a → b", "{}", "{}"]);
    let outcome = pipeline.analyze("short").unwrap();
    assert_eq!(outcome.report().unwrap().transcript_summary, "short...");
}

#[test]
fn each_stage_uses_its_generation_options() {
    let (service, pipeline) = pipeline(&[two_pairs().as_str(), "1. a → b", "{}", "{}"]);
    pipeline.analyze(TRANSCRIPT).unwrap();

    let calls = service.calls();
    let settings: Vec<(u32, f64)> = calls
        .iter()
        .map(|c| (c.options.max_output_tokens, c.options.temperature))
        .collect();
    assert_eq!(
        settings,
        [(1_000, 0.3), (1_500, 0.4), (2_000, 0.3), (1_500, 0.3)]
    );
    assert!(calls[0].prompt.contains(TRANSCRIPT));
    assert!(calls[2].prompt.contains("chain_1: a → b"));
}

#[test]
fn scripted_failure_variant_round_trip() {
    let service = ScriptedReasoner::new("scripted-model");
    service.push(ScriptedReply::Text(two_pairs()));
    service.push(ScriptedReply::Fail("gone".into()));
    let (service, pipeline) = pipeline_with(service, PipelineConfig::default());

    let outcome = pipeline.analyze(TRANSCRIPT).unwrap();
    assert!(matches!(
        outcome,
        AnalysisOutcome::Aborted {
            failed_stage: PipelineStage::ChainBuilding,
            ..
        }
    ));
    assert_eq!(service.remaining(), 0);
}
