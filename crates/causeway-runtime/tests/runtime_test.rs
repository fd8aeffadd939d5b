use std::sync::Arc;

use causeway_core::config::CausewayConfig;
use causeway_core::{AnalysisOutcome, CausewayError, IReasoningService, RecordName};
use causeway_memory::InMemoryStore;
use causeway_runtime::{CausewayRuntime, CohortRunner, CohortStep, RuntimeOptions};
use serde_json::json;
use test_fixtures::{load_fixture, GoldenScenario, ScriptedReasoner, ScriptedReply};

/// Answers by prompt kind so parallel runs stay deterministic.
fn prompt_aware_service() -> ScriptedReasoner {
    ScriptedReasoner::from_fn("scripted-model", |prompt, _| {
        if prompt.starts_with("SESSION #") {
            if prompt.contains("FAIL_SESSION") {
                return Err(CausewayError::ServiceUnavailable {
                    service: ScriptedReasoner::NAME.into(),
                    reason: "session backend down".into(),
                });
            }
            Ok(format!(
                "Thank you for sharing.\n{}",
                json!({"memory_updates": {"sessions.md": "First contact."}})
            ))
        } else {
            Ok(json!({"pairs": []}).to_string())
        }
    })
}

fn runtime(service: ScriptedReasoner, config: CausewayConfig) -> Arc<CausewayRuntime> {
    let service: Arc<dyn IReasoningService> = Arc::new(service);
    Arc::new(CausewayRuntime::with_store(
        service,
        Arc::new(InMemoryStore::new()),
        config,
    ))
}

#[test]
fn participant_ids_are_zero_padded() {
    let runner = CohortRunner::new(runtime(prompt_aware_service(), CausewayConfig::default()));
    assert_eq!(runner.participant_id(0), "P_000");
    assert_eq!(runner.participant_id(42), "P_042");
    assert_eq!(runner.participant_id(1234), "P_1234");
}

#[test]
fn cohort_runs_analysis_and_first_session() {
    let scenario: GoldenScenario = load_fixture("golden/wildfire.json");
    let service = scenario.reasoner();
    service.push(ScriptedReply::Text(format!(
        "That sounds exhausting.\n{}",
        json!({"memory_updates": {"assessment": "Sleep loss tied to wildfire news."}})
    )));
    let runtime = runtime(service, CausewayConfig::default());
    let runner = CohortRunner::new(Arc::clone(&runtime));

    let entries = runner.run(&[scenario.transcript.as_str()]);
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.participant_id, "P_000");

    let report = entry.causal_analysis.completed().and_then(AnalysisOutcome::report).unwrap();
    assert_eq!(report.causal_pairs_found, scenario.expected.causal_pairs_found);

    let session = entry.session.completed().unwrap();
    assert_eq!(session.session_number, 1);
    assert_eq!(session.therapeutic_response, "That sounds exhausting.");
    assert_eq!(session.memory_updates_applied, ["assessment"]);
    assert_eq!(
        runtime
            .sessions
            .subject("P_000")
            .read(RecordName::Assessment)
            .unwrap(),
        "Sleep loss tied to wildfire news."
    );
}

#[test]
fn session_failure_does_not_stop_the_cohort() {
    let runner = CohortRunner::new(runtime(prompt_aware_service(), CausewayConfig::default()));
    let entries = runner.run(&["first transcript", "FAIL_SESSION please", "third transcript"]);

    let ids: Vec<&str> = entries.iter().map(|e| e.participant_id.as_str()).collect();
    assert_eq!(ids, ["P_000", "P_001", "P_002"]);

    assert_eq!(
        entries[1].causal_analysis,
        CohortStep::Completed(AnalysisOutcome::no_causal_pairs())
    );
    let error = entries[1].session.error().unwrap();
    assert!(error.contains("session backend down"), "{error}");

    for entry in [&entries[0], &entries[2]] {
        assert_eq!(
            entry.session.completed().unwrap().memory_updates_applied,
            ["sessions"]
        );
    }
}

#[test]
fn empty_transcript_fails_both_steps_on_its_entry() {
    let runner = CohortRunner::new(runtime(prompt_aware_service(), CausewayConfig::default()));
    let entries = runner.run(&["   ", "real transcript"]);
    assert!(entries[0].causal_analysis.is_failed());
    assert!(entries[0].session.is_failed());
    assert!(entries[1].session.completed().is_some());
}

#[test]
fn parallel_cohort_keeps_input_order() {
    let mut config = CausewayConfig::default();
    config.runtime.parallel_subjects = true;
    let runtime = runtime(prompt_aware_service(), config);
    let runner = CohortRunner::new(Arc::clone(&runtime));

    let transcripts: Vec<String> = (0..12).map(|i| format!("transcript number {i}")).collect();
    let entries = runner.run(&transcripts);

    assert_eq!(entries.len(), 12);
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.participant_id, format!("P_{i:03}"));
        assert!(entry.session.completed().is_some());
        let sessions = runtime
            .sessions
            .subject(&entry.participant_id)
            .read(RecordName::Sessions)
            .unwrap();
        assert!(sessions.ends_with("[Session #1]\nFirst contact."));
    }
}

#[test]
fn cohort_entry_json_shape() {
    let runner = CohortRunner::new(runtime(prompt_aware_service(), CausewayConfig::default()));
    let entries = runner.run(&["FAIL_SESSION"]);
    let value = serde_json::to_value(&entries[0]).unwrap();
    assert_eq!(value["participant_id"], "P_000");
    assert_eq!(
        value["causal_analysis"]["completed"],
        json!({"error": "No causal pairs found"})
    );
    assert!(value["session"]["failed"]["error"].is_string());
}

#[test]
fn new_uses_inline_config_and_fs_store() {
    let dir = tempfile::tempdir().unwrap();
    let toml = format!(
        "[memory]\nroot_dir = {:?}\n\n[runtime]\nparticipant_id_width = 4\n",
        dir.path().display().to_string()
    );
    let service: Arc<dyn IReasoningService> = Arc::new(prompt_aware_service());
    let runtime = CausewayRuntime::new(
        service,
        RuntimeOptions {
            config_toml: Some(toml),
            ..RuntimeOptions::default()
        },
    )
    .unwrap();
    assert_eq!(runtime.config.runtime.participant_id_width, 4);

    let runner = CohortRunner::new(Arc::new(runtime));
    let entries = runner.run(&["hello"]);
    assert_eq!(entries[0].participant_id, "P_0000");
    assert!(dir
        .path()
        .join("participant_P_0000")
        .join("sessions.md")
        .is_file());
}

#[test]
fn new_rejects_invalid_inline_config() {
    let service: Arc<dyn IReasoningService> = Arc::new(prompt_aware_service());
    let err = CausewayRuntime::new(
        service,
        RuntimeOptions {
            config_toml: Some("[pipeline]\nmax_interventions = 9\n".into()),
            in_memory_store: true,
            ..RuntimeOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, CausewayError::Config(_)));
}

#[test]
fn new_reports_missing_config_file() {
    let service: Arc<dyn IReasoningService> = Arc::new(prompt_aware_service());
    let err = CausewayRuntime::new(
        service,
        RuntimeOptions {
            config_path: Some("/definitely/not/here/causeway.toml".into()),
            ..RuntimeOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, CausewayError::Config(_)));
}
