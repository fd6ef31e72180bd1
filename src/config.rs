//! Catalog configuration
//!
//! Loaded from a JSON file. Every key is optional:
//!
//! ```json
//! {
//!   "schema_dir": "./schemas",
//!   "log_level": "info",
//!   "validation": { "unknown_fields": "strip", "max_depth": 32 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid log_level '{0}'. Must be one of trace, debug, info, warn, error.")]
    InvalidLogLevel(String),

    #[error("validation.max_depth must be > 0")]
    InvalidMaxDepth,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What to do with keys a schema does not declare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Drop them from the validated output
    #[default]
    Strip,
    /// Report each one as a validation issue
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,

    /// Maximum nesting of objects and arrays before a value is rejected
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::default(),
            max_depth: default_max_depth(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Extra schema declarations loaded on top of the built-in catalog
    #[serde(default)]
    pub schema_dir: Option<PathBuf>,

    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_max_depth() -> usize {
    32
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            schema_dir: None,
            log_level: default_log_level(),
            validation: ValidationConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: CatalogConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }

        if self.validation.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth);
        }

        Ok(())
    }
}
