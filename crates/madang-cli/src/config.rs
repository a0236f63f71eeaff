use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use madang_core::RoleAssignments;
use madang_generate::GenerateOptions;
use madang_store::SinkConfig;

/// Config file read when `--config` is not given, if present.
pub const DEFAULT_CONFIG_PATH: &str = "madang-seed.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings for one invocation, passed explicitly to each component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sink: SinkConfig,
    pub generate: GenerateOptions,
    pub roles: RoleAssignments,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Command-line values win over the file.
    pub fn apply_overrides(&mut self, conn: Option<String>, seed: Option<u64>) {
        if let Some(conn) = conn {
            self.sink.url = conn;
        }
        if seed.is_some() {
            self.generate.seed = seed;
        }
    }
}
