//! CausewayRuntime: resolves config, picks a store, builds the engines.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use causeway_causal::CausalPipeline;
use causeway_core::config::CausewayConfig;
use causeway_core::{CausewayResult, IDurableStore, IReasoningService};
use causeway_memory::{FsStore, InMemoryStore, SessionAgent};

/// Options for building a runtime.
#[derive(Debug, Default)]
pub struct RuntimeOptions {
    /// Config file; environment overrides apply. Ignored when `config_toml` is set.
    pub config_path: Option<PathBuf>,
    /// Inline TOML configuration. If both are None, uses defaults.
    pub config_toml: Option<String>,
    /// Keep memory in process instead of under `memory.root_dir`.
    pub in_memory_store: bool,
    /// Install the global tracing subscriber from `observability`.
    pub init_tracing: bool,
}

/// The configured engines, shared by every subject.
pub struct CausewayRuntime {
    pub pipeline: CausalPipeline,
    pub sessions: SessionAgent,
    pub store: Arc<dyn IDurableStore>,
    pub config: CausewayConfig,
}

impl CausewayRuntime {
    pub fn new(service: Arc<dyn IReasoningService>, opts: RuntimeOptions) -> CausewayResult<Self> {
        let config = match (&opts.config_toml, &opts.config_path) {
            (Some(toml_str), _) => {
                let config = CausewayConfig::from_toml(toml_str)?;
                config.validate()?;
                config
            }
            (None, Some(path)) => CausewayConfig::load(path)?,
            (None, None) => CausewayConfig::default(),
        };

        if opts.init_tracing {
            causeway_observability::init_tracing(&config.observability);
        }

        let store: Arc<dyn IDurableStore> = if opts.in_memory_store {
            Arc::new(InMemoryStore::new())
        } else {
            Arc::new(FsStore::new(&config.memory.root_dir))
        };

        info!(
            model = service.model_id(),
            service = service.name(),
            in_memory_store = opts.in_memory_store,
            root_dir = %config.memory.root_dir,
            "runtime initialized"
        );
        Ok(Self::with_store(service, store, config))
    }

    /// Build around an existing store. `config` is used as given.
    pub fn with_store(
        service: Arc<dyn IReasoningService>,
        store: Arc<dyn IDurableStore>,
        config: CausewayConfig,
    ) -> Self {
        Self {
            pipeline: CausalPipeline::new(Arc::clone(&service), config.pipeline.clone()),
            sessions: SessionAgent::new(service, Arc::clone(&store), config.memory.clone()),
            store,
            config,
        }
    }
}

impl std::fmt::Debug for CausewayRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CausewayRuntime")
            .field("sessions", &self.sessions)
            .field("config", &self.config)
            .finish()
    }
}
