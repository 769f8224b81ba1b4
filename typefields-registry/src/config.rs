//! Registry configuration.
//!
//! Layered with figment: built-in defaults, then an optional YAML file,
//! then `TYPEFIELDS_*` environment variables.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldsError, Result};

/// Prefix for environment overrides, e.g. `TYPEFIELDS_ANCHOR_COLUMN`.
pub const ENV_PREFIX: &str = "TYPEFIELDS_";

/// Tunables of the field registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Post type whose taxonomy screens get fields spliced after the anchor column
    pub report_post_type: String,
    /// Column after which taxonomy field columns are inserted
    pub anchor_column: String,
    /// Priority used for every hook subscription
    pub hook_priority: i32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            report_post_type: "einsatz".to_string(),
            anchor_column: "description".to_string(),
            hook_priority: 10,
        }
    }
}

impl RegistryConfig {
    /// Load configuration, optionally reading a YAML file first.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(RegistryConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        let config: RegistryConfig = figment.extract()?;
        config.validate()?;
        debug!(
            report_post_type = %config.report_post_type,
            anchor_column = %config.anchor_column,
            hook_priority = config.hook_priority,
            "registry config loaded"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.report_post_type.trim().is_empty() {
            return Err(FieldsError::InvalidConfig {
                message: "report_post_type must not be empty".into(),
            });
        }
        if self.anchor_column.trim().is_empty() {
            return Err(FieldsError::InvalidConfig {
                message: "anchor_column must not be empty".into(),
            });
        }
        Ok(())
    }
}
