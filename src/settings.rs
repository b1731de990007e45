//! Engine settings file.
//!
//! All fields are optional; missing ones keep [`EngineConfig`] defaults and
//! command-line flags override whatever the file sets.
//!
//! ```toml
//! hard_cap = 40000000
//! soft_cap = 10000
//! timeout_ms = 30000
//! parallel = true
//! strategy = "auto"
//! default_method = "kemeny-snell"
//!
//! [anneal]
//! seed = 7
//! max_iterations = 500000
//! ```

use crate::anneal::{AnnealConfig, CoolingSchedule};
use crate::consensus::{EngineConfig, SearchStrategy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Annealing overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnealSettings {
    pub initial_temperature: Option<f64>,
    pub min_temperature: Option<f64>,
    pub cooling: Option<CoolingSchedule>,
    pub iterations_per_temperature: Option<usize>,
    pub max_iterations: Option<usize>,
    pub seed: Option<u64>,
}

/// Contents of a settings file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    pub hard_cap: Option<u64>,
    pub soft_cap: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub parallel: Option<bool>,
    pub slice_size: Option<u64>,
    pub max_retained_ties: Option<usize>,
    pub strict_method: Option<bool>,
    pub strategy: Option<SearchStrategy>,
    pub default_method: Option<String>,
    #[serde(default)]
    pub anneal: AnnealSettings,
}

impl EngineSettings {
    /// Parses settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Loads settings from `path`. A missing file yields empty settings.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Applies these settings on top of `base` and validates the result.
    pub fn apply(&self, base: EngineConfig) -> Result<EngineConfig, SettingsError> {
        let mut config = base;
        if let Some(v) = self.hard_cap {
            config.hard_cap = v;
        }
        if let Some(v) = self.soft_cap {
            config.soft_cap = v;
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout = Some(Duration::from_millis(ms));
        }
        if let Some(v) = self.parallel {
            config.parallel = v;
        }
        if let Some(v) = self.slice_size {
            config.slice_size = v;
        }
        if let Some(v) = self.max_retained_ties {
            config.max_retained_ties = v;
        }
        if let Some(v) = self.strict_method {
            config.strict_method = v;
        }
        if let Some(v) = self.strategy {
            config.strategy = v;
        }
        config.anneal = self.anneal.apply(config.anneal);

        config.validate().map_err(SettingsError::Invalid)?;
        Ok(config)
    }

    /// Engine config from defaults plus these settings.
    pub fn to_config(&self) -> Result<EngineConfig, SettingsError> {
        self.apply(EngineConfig::default())
    }
}

impl AnnealSettings {
    fn apply(&self, base: AnnealConfig) -> AnnealConfig {
        let mut config = base;
        if let Some(v) = self.initial_temperature {
            config.initial_temperature = v;
        }
        if let Some(v) = self.min_temperature {
            config.min_temperature = v;
        }
        if let Some(v) = self.cooling {
            config.cooling = v;
        }
        if let Some(v) = self.iterations_per_temperature {
            config.iterations_per_temperature = v;
        }
        if let Some(v) = self.max_iterations {
            config.max_iterations = v;
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        config
    }
}
