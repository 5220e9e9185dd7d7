//! Configuration management for the opina feedback pipeline

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main configuration for the feedback pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpinaConfig {
    /// Service configuration
    pub service: ServiceConfig,

    /// Store configuration
    pub store: StoreConfig,

    /// Feedback input limits
    pub limits: LimitsConfig,

    /// Observability settings
    pub observability: ObservabilityConfig,
}

impl OpinaConfig {
    /// Load configuration from file and environment
    ///
    /// Values from the optional YAML file are overridden by environment
    /// variables prefixed with `OPINA_` (sections separated by `__`, e.g.
    /// `OPINA_STORE__COLLECTION_PATH`).
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed("OPINA_").split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.store.collection_path.is_empty() {
            return Err(ConfigError::ValidationError(
                "Store collection path required".to_string(),
            ));
        }

        if self.limits.min_comment_chars > self.limits.max_comment_chars {
            return Err(ConfigError::ValidationError(format!(
                "Comment limits inverted: min {} > max {}",
                self.limits.min_comment_chars, self.limits.max_comment_chars
            )));
        }

        Ok(())
    }
}

impl Default for OpinaConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            store: StoreConfig::default(),
            limits: LimitsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "opina".to_string(),
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Collection path feedback records are appended under
    pub collection_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collection_path: "feedbacks".to_string(),
        }
    }
}

/// Feedback input limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Minimum comment length in characters
    pub min_comment_chars: usize,

    /// Maximum comment length in characters
    pub max_comment_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            min_comment_chars: 10,
            max_comment_chars: 500,
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter (e.g. "info", "debug")
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
