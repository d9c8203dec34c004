//! Challenge Catalog HTTP API
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/api/challenges` | catalog entries ordered by numeric id |
//! | GET | `/api/challenge/{id}` | metadata, rendered prompt, tests and starter code |
//!
//! # Modules
//!
//! - [`error`] - API errors and their HTTP representation
//! - [`routes`] - Router and request handlers

pub mod error;
pub mod routes;

use std::sync::Arc;

use catalog_core::Config;
use catalog_store::ChallengeStore;
pub use error::ApiError;
pub use routes::{SKIPPED_HEADER, create_router};
use tokio::net::TcpListener;

/// Shared, immutable state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Store reading the configured data root.
    pub store: ChallengeStore,
}

impl AppState {
    /// Create state over an existing store.
    pub fn new(store: ChallengeStore) -> Self {
        Self { store }
    }

    /// Create state reading the configured data root.
    pub fn from_config(config: &Config) -> Self {
        Self::new(ChallengeStore::from_config(config))
    }
}

/// Serve the API on `listener` until Ctrl-C is received.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, root = %state.store.root().display(), "serving challenge catalog");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
