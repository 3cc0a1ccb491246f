use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::policy::Policy;

/// Tag name used when none is configured.
pub const DEFAULT_TAG: &str = "db";

/// Settings a [`Mapper`](crate::Mapper) starts from.
///
/// Every field can be overridden on the mapper afterwards.
///
/// # Example
///
/// ```text
/// tag = "custom_tag"
/// policy = "exclude"
/// default_value = "DEFAULT"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Annotation key scanned for output names.
    pub tag: String,
    pub policy: Policy,
    /// Value written for empty fields under [`Policy::UseDefault`].
    pub default_value: Value,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            policy: Policy::default(),
            default_value: Value::Null,
        }
    }
}

impl MapperConfig {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Parses a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads a TOML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded mapper config from {}", path.display());
        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
