use config::{Config as ConfigLoader, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ContextError, Result};
use crate::templates::DEFAULT_SYSTEM_PROMPT_TEMPLATE;

/// Tuning knobs for windowing and summarization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Number of most recent messages kept verbatim in a context package
    pub recent_window_size: usize,
    /// New messages needed before a thread summary is recomputed
    pub resummarize_threshold: usize,
    /// Optional cap on a package's estimated tokens; a history over it is
    /// compacted even when it fits in the window. Only a single message larger
    /// than the cap can exceed it.
    pub token_budget: Option<usize>,
    pub engine: EngineSettings,
    /// System prompt; `<summary>` is replaced with the package digest
    pub system_prompt_template: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            recent_window_size: 20,
            resummarize_threshold: 20,
            token_budget: None,
            engine: EngineSettings::default(),
            system_prompt_template: DEFAULT_SYSTEM_PROMPT_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub model: String,
    pub summary_temperature: f32,
    pub digest_temperature: f32,
    pub timeout_secs: u64,
    pub max_tokens: Option<u32>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            summary_temperature: 0.3,
            digest_temperature: 0.3,
            timeout_secs: 30,
            max_tokens: None,
        }
    }
}

impl EngineSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recent_window_size(mut self, size: usize) -> Self {
        self.recent_window_size = size;
        self
    }

    pub fn with_resummarize_threshold(mut self, threshold: usize) -> Self {
        self.resummarize_threshold = threshold;
        self
    }

    pub fn with_token_budget(mut self, budget: usize) -> Self {
        self.token_budget = Some(budget);
        self
    }

    pub fn with_engine(mut self, engine: EngineSettings) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_system_prompt_template(mut self, template: impl Into<String>) -> Self {
        self.system_prompt_template = template.into();
        self
    }

    /// Load configuration from an optional TOML file and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. built-in defaults
    /// 2. `config/memory.toml` (if present)
    /// 3. `COLLOQUY_*` variables, `__` for nesting (e.g. `COLLOQUY_ENGINE__MODEL`)
    pub fn load() -> Result<Self> {
        Self::load_from("config/memory")
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = ConfigLoader::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(
                Environment::with_prefix("COLLOQUY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a TOML document, without consulting the environment
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config = ConfigLoader::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;

        let cfg: Self = config.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.recent_window_size == 0 {
            return Err(ContextError::InvalidInput("recent_window_size must be at least 1".to_string()));
        }
        if self.resummarize_threshold == 0 {
            return Err(ContextError::InvalidInput("resummarize_threshold must be at least 1".to_string()));
        }
        if self.engine.timeout_secs == 0 {
            return Err(ContextError::InvalidInput("engine.timeout_secs must be at least 1".to_string()));
        }
        if self.token_budget == Some(0) {
            return Err(ContextError::InvalidInput("token_budget must be positive when set".to_string()));
        }
        Ok(())
    }
}
