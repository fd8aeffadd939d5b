// Single source of truth for all default values.

// --- Pipeline: stage 1, pair extraction ---
pub const DEFAULT_PAIRS_MAX_TOKENS: u32 = 1_000;
pub const DEFAULT_PAIRS_TEMPERATURE: f64 = 0.3;

// --- Pipeline: stage 2, chain synthesis ---
pub const DEFAULT_CHAINS_MAX_TOKENS: u32 = 1_500;
pub const DEFAULT_CHAINS_TEMPERATURE: f64 = 0.4;
pub const DEFAULT_MAX_CHAINS: usize = 10;
pub const DEFAULT_GRAPH_FALLBACK: bool = false;
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 8;

// --- Pipeline: stage 3, confidence scoring ---
pub const DEFAULT_CONFIDENCE_MAX_TOKENS: u32 = 2_000;
pub const DEFAULT_CONFIDENCE_TEMPERATURE: f64 = 0.3;

// --- Pipeline: stage 4, intervention ranking ---
pub const DEFAULT_INTERVENTIONS_MAX_TOKENS: u32 = 1_500;
pub const DEFAULT_INTERVENTIONS_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MIN_INTERVENTION_CONFIDENCE: f64 = 0.8;
pub const DEFAULT_MAX_INTERVENTIONS: usize = 3;

// --- Pipeline: report ---
pub const DEFAULT_SUMMARY_CHARS: usize = 200;
pub const DEFAULT_SUMMARY_PAIRS: usize = 5;

// --- Memory ---
pub const DEFAULT_MEMORY_ROOT: &str = "./protocols";
pub const DEFAULT_SESSION_MAX_TOKENS: u32 = 3_000;
pub const DEFAULT_SESSION_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_SUMMARY_MAX_TOKENS: u32 = 2_000;
pub const DEFAULT_SUMMARY_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_JOURNAL_MAX_TOKENS: u32 = 1_000;
pub const DEFAULT_JOURNAL_TEMPERATURE: f64 = 0.7;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;

// --- Runtime ---
pub const DEFAULT_PARALLEL_SUBJECTS: bool = false;
pub const DEFAULT_PARTICIPANT_ID_WIDTH: usize = 3;
