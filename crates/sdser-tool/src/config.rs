//! Tool configuration.
//!
//! Loaded from an optional YAML file. Every field has a default, so an empty
//! file (or no file) is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};

/// Default encode buffer capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 512;

/// Default log level when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Indented JSON.
    #[default]
    Pretty,
    /// Single-line JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Configuration for the `sdser` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Size of the buffer requests are encoded into.
    pub capacity: usize,
    /// Log level filter, e.g. `info` or `sdser_codec=trace`.
    pub log_level: String,
    /// Output format.
    pub output: OutputFormat,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            capacity: DEFAULT_CAPACITY,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            output: OutputFormat::default(),
        }
    }
}

impl ToolConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> ToolResult<Self> {
        if text.trim().is_empty() {
            return Ok(ToolConfig::default());
        }
        let config: ToolConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> ToolResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> ToolResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(ToolConfig::default()),
        }
    }

    fn validate(&self) -> ToolResult<()> {
        if self.capacity == 0 {
            return Err(ToolError::Config("capacity must be at least 1".to_string()));
        }
        if self.log_level.trim().is_empty() {
            return Err(ToolError::Config("log_level must not be empty".to_string()));
        }
        Ok(())
    }
}
