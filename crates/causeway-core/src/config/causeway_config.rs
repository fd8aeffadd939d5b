use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{MemoryConfig, ObservabilityConfig, PipelineConfig, RuntimeConfig};
use crate::constants::MAX_INTERVENTION_CANDIDATES;
use crate::errors::{CausewayResult, ConfigError};
use crate::models::GenerationOptions;

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "CAUSEWAY_";

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CausewayConfig {
    pub pipeline: PipelineConfig,
    pub memory: MemoryConfig,
    pub observability: ObservabilityConfig,
    pub runtime: RuntimeConfig,
}

impl CausewayConfig {
    /// Parse from TOML. Missing sections and fields fall back to defaults.
    pub fn from_toml(toml_str: &str) -> CausewayResult<Self> {
        toml::from_str(toml_str).map_err(|e| {
            ConfigError::ParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load a config file, apply `CAUSEWAY_*` environment overrides, validate.
    pub fn load(path: impl AsRef<Path>) -> CausewayResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound { path: display }.into());
        }
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
            path: display.clone(),
            message: e.to_string(),
        })?;
        let mut config: Self = toml::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: display,
            message: e.to_string(),
        })?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    ///
    /// Recognised keys: `CAUSEWAY_LOG_LEVEL`, `CAUSEWAY_JSON_LOGS`,
    /// `CAUSEWAY_MEMORY_ROOT`, `CAUSEWAY_PARALLEL_SUBJECTS`,
    /// `CAUSEWAY_GRAPH_FALLBACK`, `CAUSEWAY_MIN_INTERVENTION_CONFIDENCE`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CausewayResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));

        if let Some(level) = get("LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(v) = get("JSON_LOGS") {
            self.observability.json_logs = parse_flag("JSON_LOGS", &v)?;
        }
        if let Some(root) = get("MEMORY_ROOT") {
            self.memory.root_dir = root;
        }
        if let Some(v) = get("PARALLEL_SUBJECTS") {
            self.runtime.parallel_subjects = parse_flag("PARALLEL_SUBJECTS", &v)?;
        }
        if let Some(v) = get("GRAPH_FALLBACK") {
            self.pipeline.graph_fallback = parse_flag("GRAPH_FALLBACK", &v)?;
        }
        if let Some(v) = get("MIN_INTERVENTION_CONFIDENCE") {
            self.pipeline.min_intervention_confidence =
                v.trim().parse().map_err(|_| ConfigError::ValidationFailed {
                    field: format!("{ENV_PREFIX}MIN_INTERVENTION_CONFIDENCE"),
                    message: format!("not a number: {v:?}"),
                })?;
        }
        Ok(())
    }

    /// Reject out-of-range values. Reports the first offending field.
    pub fn validate(&self) -> CausewayResult<()> {
        let p = &self.pipeline;
        check_unit("pipeline.min_intervention_confidence", p.min_intervention_confidence)?;
        if p.max_interventions == 0 || p.max_interventions > MAX_INTERVENTION_CANDIDATES {
            return Err(invalid(
                "pipeline.max_interventions",
                format!(
                    "must be in 1..={MAX_INTERVENTION_CANDIDATES}, got {}",
                    p.max_interventions
                ),
            ));
        }
        if p.max_chains == 0 {
            return Err(invalid("pipeline.max_chains", "must be > 0".to_string()));
        }
        if p.max_chain_depth < 2 {
            return Err(invalid(
                "pipeline.max_chain_depth",
                format!("must be >= 2, got {}", p.max_chain_depth),
            ));
        }

        let generation: [(&str, &GenerationOptions); 7] = [
            ("pipeline.pairs", &p.pairs),
            ("pipeline.chains", &p.chains),
            ("pipeline.confidence", &p.confidence),
            ("pipeline.interventions", &p.interventions),
            ("memory.session", &self.memory.session),
            ("memory.summary", &self.memory.summary),
            ("memory.journal", &self.memory.journal),
        ];
        for (field, options) in generation {
            check_generation(field, options)?;
        }

        if self.memory.root_dir.trim().is_empty() {
            return Err(invalid("memory.root_dir", "must not be empty".to_string()));
        }
        if self.runtime.participant_id_width == 0 {
            return Err(invalid(
                "runtime.participant_id_width",
                "must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_unit(field: &str, value: f64) -> CausewayResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(invalid(field, format!("must be in [0.0, 1.0], got {value}")));
    }
    Ok(())
}

fn check_generation(field: &str, options: &GenerationOptions) -> CausewayResult<()> {
    if !options.temperature.is_finite() || !(0.0..=2.0).contains(&options.temperature) {
        return Err(invalid(
            &format!("{field}.temperature"),
            format!("must be in [0.0, 2.0], got {}", options.temperature),
        ));
    }
    if options.max_output_tokens == 0 {
        return Err(invalid(
            &format!("{field}.max_output_tokens"),
            "must be > 0".to_string(),
        ));
    }
    Ok(())
}

fn parse_flag(key: &str, value: &str) -> CausewayResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(
            &format!("{ENV_PREFIX}{key}"),
            format!("not a boolean: {value:?}"),
        )),
    }
}

fn invalid(field: &str, message: String) -> crate::errors::CausewayError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message,
    }
    .into()
}
