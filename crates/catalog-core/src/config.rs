//! Catalog configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Prefix of environment variables layered over the configuration file.
pub const ENV_PREFIX: &str = "CATALOG";

/// Main configuration structure for the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Challenge data settings.
    #[serde(default)]
    pub data: DataConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Challenge data configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding one subdirectory per challenge.
    #[serde(default = "default_data_root")]
    pub root: PathBuf,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data/2023")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: default_data_root(),
        }
    }
}

impl Config {
    /// Default configuration serving challenges from `root`.
    pub fn with_data_root(root: impl Into<PathBuf>) -> Self {
        Self {
            data: DataConfig { root: root.into() },
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional file with `CATALOG__SECTION__KEY`
    /// environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::load_with_env_source(path, None)
    }

    /// Like [`Config::load_with_env`], reading variables from `vars` instead of
    /// the process environment when given.
    fn load_with_env_source(
        path: &Path,
        vars: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.data.root.as_os_str().is_empty() {
            return Err(CoreError::config("data.root cannot be empty"));
        }

        if self.server.host.is_empty() {
            return Err(CoreError::config("server.host cannot be empty"));
        }

        if self.server.port == 0 {
            return Err(CoreError::config("server.port cannot be 0"));
        }

        if self.data.root.is_relative() {
            tracing::debug!(root = %self.data.root.display(), "data.root is relative to the working directory");
        }

        Ok(())
    }

    /// Address string for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
