//! Configuration handling for the docdex binary.
//!
//! All engine tunables live in the component config structs from
//! `docdex-core`; this module composes them into one TOML-loadable file.

use anyhow::{Context, Result};
use docdex_core::{IngestConfig, SearchConfig, VectorizerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Fingerprint shapes
    #[serde(default)]
    pub vectorizer: VectorizerConfig,

    /// Vector-search relevance threshold
    #[serde(default)]
    pub search: SearchConfig,

    /// Upload limits
    #[serde(default)]
    pub ingest: IngestConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (overridden by `RUST_LOG` when set)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, or defaults if `path` is
    /// `None` or the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Render a sample configuration file with all defaults.
    pub fn sample() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("serializing sample config")
    }
}
