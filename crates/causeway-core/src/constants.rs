/// Error payload emitted when stage 1 finds nothing to analyze.
pub const NO_CAUSAL_PAIRS_ERROR: &str = "No causal pairs found";

/// Provenance marker written into every analysis report.
pub const REASONING_DEPTH: &str = "4-step mechanistic causal reasoning";

/// Suffix appended to the truncated transcript summary.
pub const SUMMARY_ELLIPSIS: &str = "...";

/// Hard ceiling on retained intervention candidates.
pub const MAX_INTERVENTION_CANDIDATES: usize = 3;

/// Minimum nodes in a valid causal chain.
pub const MIN_CHAIN_NODES: usize = 2;

/// Delimiter used when rendering a chain for display.
pub const CHAIN_DISPLAY_DELIMITER: &str = " → ";

/// Delimiter used when rendering a single evaluated link.
pub const LINK_DISPLAY_DELIMITER: &str = "→";

/// Directional delimiters accepted when parsing chains and links.
pub const CHAIN_DELIMITERS: &[&str] = &["→", "⟶", "->", "=>"];

/// Prefix of a subject's namespace in the durable store.
pub const SUBJECT_NAMESPACE_PREFIX: &str = "participant_";

/// File extension used for persisted memory records.
pub const RECORD_EXTENSION: &str = "md";

/// Key of the structured update object embedded in session replies.
pub const MEMORY_UPDATES_KEY: &str = "memory_updates";
