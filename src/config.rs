use crate::cli::OutputFormat;
use crate::query::QueryOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TxtqlConfig {
    /// Default for queries that do not end with `casesensitive`.
    pub case_sensitive: bool,
    pub repl: ReplSettings,
    pub output: OutputSettings,
}

impl TxtqlConfig {
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions::new().case_sensitive(self.case_sensitive)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReplSettings {
    pub prompt: String,
    pub banner: bool,
    pub no_match_message: String,
}

impl Default for ReplSettings {
    fn default() -> Self {
        Self {
            prompt: "Query> ".to_string(),
            banner: true,
            no_match_message: "(no matching lines)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub line_numbers: bool,
}

pub fn load_config(path: Option<&Path>) -> Result<TxtqlConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<TxtqlConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    let config = toml::from_str::<TxtqlConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })?;
    tracing::debug!(file = %path.display(), "loaded config");
    Ok(config)
}

pub fn default_config() -> &'static TxtqlConfig {
    static DEFAULT_CONFIG: LazyLock<TxtqlConfig> = LazyLock::new(TxtqlConfig::default);
    &DEFAULT_CONFIG
}
