//! Challenge Catalog CLI Library
//!
//! Command implementations for the `catalog` binary, exposed as a library so
//! they can be driven from tests.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (serve, list, show, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use catalog::{Overrides, cmd, load_config};
//!
//! # async fn demo() -> color_eyre::eyre::Result<()> {
//! let config = load_config(Path::new("catalog.toml"), &Overrides::default())?;
//! cmd::list::run(&config).await?;
//! # Ok(())
//! # }
//! ```

pub mod cmd;

use std::path::{Path, PathBuf};

pub use catalog_core::Config;
use color_eyre::eyre::{Result, WrapErr};

/// Command-line values taking precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replaces `data.root`.
    pub data_root: Option<PathBuf>,
    /// Replaces `server.host`.
    pub host: Option<String>,
    /// Replaces `server.port`.
    pub port: Option<u16>,
}

/// Resolve the configuration once at startup.
///
/// The file is optional; `CATALOG__SECTION__KEY` environment variables are
/// layered over it and command-line overrides are applied last.
pub fn load_config(config_path: &Path, overrides: &Overrides) -> Result<Config> {
    let mut config = Config::load_with_env(config_path)
        .wrap_err_with(|| format!("Failed to load configuration from {}", config_path.display()))?;

    if let Some(root) = &overrides.data_root {
        config.data.root = root.clone();
    }
    if let Some(host) = &overrides.host {
        config.server.host = host.clone();
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }

    config.validate().wrap_err("Invalid configuration")?;
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("catalog.toml"), &Overrides::default()).unwrap();
        assert_eq!(config.data.root, PathBuf::from("data/2023"));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "[server]\nport = 8080\n\n[data]\nroot = \"file-root\"\n").unwrap();

        let overrides = Overrides {
            data_root: Some(PathBuf::from("cli-root")),
            host: Some("0.0.0.0".to_string()),
            port: None,
        };
        let config = load_config(&path, &overrides).unwrap();

        assert_eq!(config.data.root, PathBuf::from("cli-root"));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            port: Some(0),
            ..Overrides::default()
        };
        assert!(load_config(&dir.path().join("catalog.toml"), &overrides).is_err());
    }
}
