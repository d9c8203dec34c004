//! API errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_store::{ErrorKind, StoreError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The challenge, or one of its files, does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The challenge exists but its data cannot be used.
    #[error("{0}")]
    MalformedData(String),

    /// The data root could not be read.
    #[error("{0}")]
    Io(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MalformedData(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::MalformedData(_) => "malformed_data",
            Self::Io(_) => "io_error",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(message),
            ErrorKind::MalformedData => Self::MalformedData(message),
            ErrorKind::Io => Self::Io(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            error!(error = %self, code, "request failed");
        } else {
            debug!(error = %self, code, "request rejected");
        }

        let message = match &self {
            // Filesystem details stay in the logs outside debug builds.
            Self::Io(_) if !cfg!(debug_assertions) => {
                "the challenge data could not be read".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::ChallengeFile;

    use super::*;

    #[test]
    fn test_store_errors_map_to_status() {
        let not_found: ApiError = StoreError::NotFound { id: "9".into() }.into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.error_code(), "not_found");

        let missing: ApiError = StoreError::MissingFile {
            id: "9".into(),
            file: ChallengeFile::User,
        }
        .into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let invalid: ApiError = StoreError::InvalidId("..".into()).into();
        assert_eq!(invalid.status_code(), StatusCode::NOT_FOUND);

        let io: ApiError = StoreError::io("data", std::io::Error::other("denied")).into();
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(io.error_code(), "io_error");
    }

    #[test]
    fn test_malformed_metadata_maps_to_server_error() {
        let source = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let err: ApiError = StoreError::Metadata {
            path: "1/metadata.json".into(),
            source,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "malformed_data");
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::NotFound("challenge 3 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
