//! Runtime configuration for the skill.
//!
//! Layered lowest to highest: built-in defaults, a JSON config file,
//! `URBAN_LOOKUP_*` environment variables, then command-line flags (applied
//! by the binary).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::consts::{DEFAULT_ENDPOINT, default_config_path};

pub const ENV_ENDPOINT: &str = "URBAN_LOOKUP_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "URBAN_LOOKUP_TIMEOUT_SECS";
pub const ENV_APPLICATION_ID: &str = "URBAN_LOOKUP_APPLICATION_ID";

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Define endpoint; the term is appended as the `term` query parameter.
    pub endpoint: String,
    /// Upper bound on the lookup request. `None` means no explicit timeout.
    pub timeout_secs: Option<u64>,
    /// When set, events from any other application are rejected.
    pub application_id: Option<String>,
    pub log_format: LogFormat,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            application_id: None,
            log_format: LogFormat::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl SkillConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` if given (it must exist), otherwise from the default
    /// location if a file is there, otherwise defaults. Environment
    /// overrides are applied on top.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env_from(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Apply `URBAN_LOOKUP_*` overrides using `get` to read variables.
    /// Empty values are ignored.
    pub fn apply_env_from(
        &mut self,
        get: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let read = |var: &str| get(var).filter(|v| !v.is_empty());

        if let Some(endpoint) = read(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(raw) = read(ENV_TIMEOUT_SECS) {
            let secs = raw.parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_TIMEOUT_SECS,
                value: raw.clone(),
            })?;
            self.timeout_secs = Some(secs);
        }
        if let Some(id) = read(ENV_APPLICATION_ID) {
            self.application_id = Some(id);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
