//! HTTP client for the catalog API.

use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use url::Url;

use crate::loader::{
    CatalogPage, CatalogPageData, ChallengePage, ChallengePageData, LoadState, PageLoader,
};

/// Why a page could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The base URL cannot carry API paths.
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("{url} returned {status}{}", message_suffix(.message))]
    Status {
        url: String,
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },

    /// The response body is not the expected JSON.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the requested page does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// Error envelope produced by the catalog server.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Client bound to one catalog server.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: Url,
    http: reqwest::Client,
}

impl CatalogClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, LoadError> {
        Self::with_http(base_url, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest` client.
    pub fn with_http(base_url: &str, http: reqwest::Client) -> Result<Self, LoadError> {
        let base_url = Url::parse(base_url).map_err(|e| LoadError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(LoadError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self { base_url, http })
    }

    /// Server this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL of an API endpoint, percent-encoding every segment.
    pub fn endpoint_url(&self, segments: &[&str]) -> Result<Url, LoadError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| LoadError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Run a page loader.
    pub async fn load<L: PageLoader>(&self, params: L::Params<'_>) -> LoadState<L::Data> {
        let segments = L::endpoint(params);
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        let result = match self.endpoint_url(&segments) {
            Ok(url) => self.fetch::<L::Payload>(url).await.map(L::into_data),
            Err(e) => Err(e),
        };

        if let Err(ref e) = result {
            tracing::warn!(error = %e, "page load failed");
        }

        result.into()
    }

    /// Load the catalog page.
    pub async fn load_catalog(&self) -> LoadState<CatalogPageData> {
        self.load::<CatalogPage>(()).await
    }

    /// Load the page of challenge `id`.
    pub async fn load_challenge(&self, id: &str) -> LoadState<ChallengePageData> {
        self.load::<ChallengePage>(id).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, LoadError> {
        tracing::debug!(%url, "fetching");

        let url_str = url.to_string();
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| LoadError::Transport {
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| LoadError::Transport {
                url: url_str.clone(),
                source,
            })?;

        if !status.is_success() {
            let envelope = serde_json::from_slice::<ErrorEnvelope>(&body).ok();
            return Err(LoadError::Status {
                url: url_str,
                status: status.as_u16(),
                code: envelope.as_ref().map(|e| e.error.code.clone()),
                message: envelope.map(|e| e.error.message),
            });
        }

        serde_json::from_slice(&body).map_err(|source| LoadError::Decode {
            url: url_str,
            source,
        })
    }
}
