//! Serve command - HTTP API over the data root

use std::sync::Arc;

use catalog_core::Config;
use catalog_server::AppState;
use color_eyre::eyre::{Result, WrapErr};
use tokio::net::TcpListener;

/// Run the serve command.
///
/// Binds the configured address and serves until Ctrl-C.
pub async fn run(config: &Config) -> Result<()> {
    tracing::info!(root = %config.data.root.display(), "Starting server");

    if !config.data.root.is_dir() {
        tracing::warn!(
            root = %config.data.root.display(),
            "data root is not a directory; listings will fail until it exists"
        );
    }

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("Failed to bind to {addr}"))?;

    println!();
    println!("  Challenge catalog running at http://{addr}");
    println!("  Serving {}", config.data.root.display());
    println!("  Press Ctrl+C to stop");
    println!();

    catalog_server::serve(listener, Arc::new(AppState::from_config(config)))
        .await
        .wrap_err("Server error")?;

    Ok(())
}
