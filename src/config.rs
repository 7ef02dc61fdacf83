//! Engine configuration
//!
//! Loaded from a YAML file (e.g. `makes-sense.yaml`). Every field has a
//! default, so an empty file is a valid configuration.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name looked up by the CLI
pub const CONFIG_FILE: &str = "makes-sense.yaml";

/// Limits applied when a table is defined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EngineConfig {
    /// Largest universe (product of domain sizes) a table may declare
    #[serde(default = "default_max_universe")]
    pub max_universe: u64,
}

fn default_max_universe() -> u64 {
    65_536
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_universe: default_max_universe(),
        }
    }
}

impl EngineConfig {
    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_norway::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading engine config");
        Self::from_yaml(&content)
    }

    /// Load `makes-sense.yaml` from `dir` if present, defaults otherwise
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn check(&self) -> Result<()> {
        if self.max_universe == 0 {
            return Err(Error::Definition(
                "max_universe must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
