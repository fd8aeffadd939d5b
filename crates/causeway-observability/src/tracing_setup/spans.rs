//! Span definitions per operation: pipeline run, pipeline stage, memory session.

/// Span around one transcript's analysis.
#[macro_export]
macro_rules! pipeline_span {
    ($run_id:expr, $model:expr) => {
        tracing::info_span!("causeway.pipeline", run_id = %$run_id, model = %$model)
    };
}

/// Span around one pipeline stage.
#[macro_export]
macro_rules! stage_span {
    ($stage:expr) => {
        tracing::info_span!("causeway.stage", stage = %$stage)
    };
}

/// Span around one memory-backed session.
#[macro_export]
macro_rules! session_span {
    ($subject_id:expr, $session_number:expr) => {
        tracing::info_span!(
            "causeway.session",
            subject_id = %$subject_id,
            session_number = $session_number
        )
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const PIPELINE: &str = "causeway.pipeline";
    pub const STAGE: &str = "causeway.stage";
    pub const SESSION: &str = "causeway.session";
}
