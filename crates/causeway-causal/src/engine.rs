//! CausalPipeline: owns the four stages, runs them in order, assembles the report.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::{debug, info, warn};

use causeway_core::config::PipelineConfig;
use causeway_core::constants::{REASONING_DEPTH, SUMMARY_ELLIPSIS};
use causeway_core::models::{DegradationEvent, InterventionRecommendations, PipelineStage};
use causeway_core::{
    AnalysisOutcome, AnalysisReport, CausalChain, CausalPair, CausewayError, CausewayResult,
    ChainEvaluation, ChainKey, IReasoningService,
};
use causeway_extraction::StructuredExtractor;
use causeway_observability::tracing_setup::events;
use causeway_observability::{pipeline_span, stage_span, DegradationTracker};

use crate::stages::chains::ChainLimits;
use crate::stages::interventions::RankingLimits;
use crate::stages::{ChainBuilder, ConfidenceEvaluator, InterventionRanker, PairExtractor};
use crate::state::PipelineState;

/// The four-stage causal analysis pipeline.
///
/// Stateless between runs apart from the degradation log, so one instance
/// can serve many transcripts, including concurrently.
pub struct CausalPipeline {
    extractor: StructuredExtractor,
    pairs: PairExtractor,
    chains: ChainBuilder,
    confidence: ConfidenceEvaluator,
    interventions: InterventionRanker,
    config: PipelineConfig,
    degradations: Mutex<DegradationTracker>,
}

/// Everything computed so far in one run.
#[derive(Default)]
struct RunData {
    pairs: Vec<CausalPair>,
    chains: Vec<CausalChain>,
    confidence: BTreeMap<ChainKey, ChainEvaluation>,
    interventions: InterventionRecommendations,
}

impl CausalPipeline {
    pub fn new(service: Arc<dyn IReasoningService>, config: PipelineConfig) -> Self {
        let extractor = StructuredExtractor::new(service);
        Self {
            pairs: PairExtractor::new(extractor.clone(), config.pairs.clone()),
            chains: ChainBuilder::new(
                extractor.clone(),
                config.chains.clone(),
                ChainLimits {
                    max_chains: config.max_chains,
                    graph_fallback: config.graph_fallback,
                    max_chain_depth: config.max_chain_depth,
                },
            ),
            confidence: ConfidenceEvaluator::new(extractor.clone(), config.confidence.clone()),
            interventions: InterventionRanker::new(
                extractor.clone(),
                config.interventions.clone(),
                RankingLimits {
                    min_confidence: config.min_intervention_confidence,
                    max_candidates: config.max_interventions,
                },
            ),
            extractor,
            config,
            degradations: Mutex::new(DegradationTracker::new()),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze one transcript.
    ///
    /// Returns `Err` for an empty transcript or a service failure in stage 1.
    /// A service failure in a later stage yields `AnalysisOutcome::Aborted`
    /// with everything computed before it.
    pub fn analyze(&self, transcript: &str) -> CausewayResult<AnalysisOutcome> {
        let run_id = uuid::Uuid::new_v4();
        let span = pipeline_span!(run_id, self.extractor.model_id());
        let _guard = span.enter();

        let mut tracker = DegradationTracker::new();
        let (state, outcome) = self.run(transcript, &mut tracker);
        self.absorb(tracker);
        debug!(state = %state, terminal = state.is_terminal(), "run finished");
        outcome
    }

    /// Drive the state machine; returns the terminal state with the outcome.
    fn run(
        &self,
        transcript: &str,
        tracker: &mut DegradationTracker,
    ) -> (PipelineState, CausewayResult<AnalysisOutcome>) {
        let mut state = PipelineState::Started;
        let mut data = RunData::default();

        while let Some(stage) = state.next_stage() {
            let stage_span = stage_span!(stage.as_str());
            let _stage_guard = stage_span.enter();
            info!("Step {}/{}: {}", stage.ordinal(), PipelineStage::ALL.len(), stage.as_str());
            let started = Instant::now();

            let produced = match self.run_stage(stage, transcript, &mut data, tracker) {
                Ok(count) => count,
                Err(err) => {
                    events::pipeline_short_circuited(&err.to_string(), state.completed_stages());
                    return (PipelineState::Error, self.fail(stage, err, transcript, data));
                }
            };
            events::stage_completed(stage.as_str(), produced, started.elapsed().as_millis());

            state = PipelineState::after(stage);
            if stage == PipelineStage::PairExtraction && data.pairs.is_empty() {
                events::pipeline_short_circuited("no causal pairs", state.completed_stages());
                return (PipelineState::Error, Ok(AnalysisOutcome::no_causal_pairs()));
            }
        }

        state = PipelineState::Done;
        info!(state = %state, pairs = data.pairs.len(), chains = data.chains.len(), "analysis complete");
        (state, Ok(AnalysisOutcome::Report(self.assemble(transcript, data))))
    }

    /// Run one stage, storing its output. Returns the number of items produced.
    fn run_stage(
        &self,
        stage: PipelineStage,
        transcript: &str,
        data: &mut RunData,
        tracker: &mut DegradationTracker,
    ) -> CausewayResult<usize> {
        match stage {
            PipelineStage::PairExtraction => {
                data.pairs = self.pairs.extract(transcript, tracker)?;
                Ok(data.pairs.len())
            }
            PipelineStage::ChainBuilding => {
                data.chains = self.chains.build(&data.pairs, tracker)?;
                Ok(data.chains.len())
            }
            PipelineStage::ConfidenceScoring => {
                data.confidence = self.confidence.evaluate(transcript, &data.chains, tracker)?;
                Ok(data.confidence.len())
            }
            PipelineStage::InterventionRanking => {
                data.interventions = self.interventions.rank(&data.chains, &data.confidence, tracker)?;
                Ok(data.interventions.len())
            }
        }
    }

    fn fail(
        &self,
        stage: PipelineStage,
        err: CausewayError,
        transcript: &str,
        data: RunData,
    ) -> CausewayResult<AnalysisOutcome> {
        warn!(state = %PipelineState::Error, stage = stage.as_str(), error = %err, "stage failed");
        if stage == PipelineStage::PairExtraction || !err.is_service_unavailable() {
            return Err(err);
        }
        Ok(AnalysisOutcome::Aborted {
            error: err.to_string(),
            failed_stage: stage,
            partial: self.assemble(transcript, data),
        })
    }

    fn assemble(&self, transcript: &str, data: RunData) -> AnalysisReport {
        let summary: String = transcript.chars().take(self.config.summary_chars).collect();
        AnalysisReport {
            transcript_summary: format!("{summary}{SUMMARY_ELLIPSIS}"),
            causal_pairs_found: data.pairs.len(),
            pairs: data.pairs.into_iter().take(self.config.summary_pairs).collect(),
            causal_chains: data.chains,
            confidence_analysis: data.confidence,
            intervention_recommendations: data.interventions,
            processing_model: self.extractor.model_id().to_string(),
            reasoning_depth: REASONING_DEPTH.to_string(),
        }
    }

    fn absorb(&self, mut run: DegradationTracker) {
        if run.is_empty() {
            return;
        }
        match self.degradations.lock() {
            Ok(mut shared) => shared.extend(run.take()),
            Err(poisoned) => poisoned.into_inner().extend(run.take()),
        }
    }

    /// Every degradation recorded across runs, oldest first.
    pub fn degradations(&self) -> Vec<DegradationEvent> {
        match self.degradations.lock() {
            Ok(shared) => shared.events().to_vec(),
            Err(poisoned) => poisoned.into_inner().events().to_vec(),
        }
    }
}
