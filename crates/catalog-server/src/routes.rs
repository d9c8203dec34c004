//! Router and request handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::Uri,
    response::IntoResponse,
    routing::get,
};
use catalog_core::{CatalogEntry, ChallengeDetail};
use tower_http::trace::TraceLayer;

use crate::{AppState, error::ApiError};

/// Response header carrying the number of challenges left out of the catalog.
pub const SKIPPED_HEADER: &str = "x-catalog-skipped";

/// Create the API router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/challenges", get(list_challenges))
        .route("/api/challenge/{id}", get(get_challenge))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// `GET /api/challenges`
async fn list_challenges(
    State(state): State<Arc<AppState>>,
) -> Result<([(&'static str, String); 1], Json<Vec<CatalogEntry>>), ApiError> {
    let listing = state.store.list().await?;

    if listing.has_skipped() {
        tracing::warn!(
            skipped = listing.skipped.len(),
            "catalog served without some challenges"
        );
    }

    Ok((
        [(SKIPPED_HEADER, listing.skipped.len().to_string())],
        Json(listing.entries),
    ))
}

/// `GET /api/challenge/{id}`
async fn get_challenge(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ChallengeDetail>, ApiError> {
    Ok(Json(state.store.read(&id).await?))
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
