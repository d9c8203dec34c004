//! Page loaders for the catalog views.

use catalog_core::{CatalogEntry, ChallengeDetail};
use serde::de::DeserializeOwned;

use crate::client::LoadError;

/// Outcome of a page load handed to the view.
#[derive(Debug)]
pub enum LoadState<T> {
    /// The page data arrived.
    Loaded(T),
    /// The page could not be loaded.
    Failed(LoadError),
}

impl<T> LoadState<T> {
    /// Whether the data arrived.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// The data, if it arrived.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Loaded(data) => Some(data),
            Self::Failed(_) => None,
        }
    }

    /// The error, if the load failed.
    pub fn err(&self) -> Option<&LoadError> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(e) => Some(e),
        }
    }

    /// Transform the loaded data.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::Loaded(data) => LoadState::Loaded(f(data)),
            Self::Failed(e) => LoadState::Failed(e),
        }
    }

    /// Convert into a `Result`.
    pub fn into_result(self) -> Result<T, LoadError> {
        self.into()
    }
}

impl<T> From<Result<T, LoadError>> for LoadState<T> {
    fn from(result: Result<T, LoadError>) -> Self {
        match result {
            Ok(data) => Self::Loaded(data),
            Err(e) => Self::Failed(e),
        }
    }
}

impl<T> From<LoadState<T>> for Result<T, LoadError> {
    fn from(state: LoadState<T>) -> Self {
        match state {
            LoadState::Loaded(data) => Ok(data),
            LoadState::Failed(e) => Err(e),
        }
    }
}

/// Data loading hook of one view.
pub trait PageLoader {
    /// Route parameters of the view, borrowed from the caller.
    type Params<'a>;

    /// JSON payload returned by the endpoint.
    type Payload: DeserializeOwned;

    /// Data exposed to the view.
    type Data;

    /// Whether the view may be pre-rendered on the server. When `false` the
    /// load must only run in the client.
    const SSR: bool;

    /// Path segments of the endpoint to fetch.
    fn endpoint(params: Self::Params<'_>) -> Vec<String>;

    /// Wrap the payload for the view.
    fn into_data(payload: Self::Payload) -> Self::Data;
}

/// Loader of the catalog view.
#[derive(Debug, Clone, Copy)]
pub struct CatalogPage;

/// Data of the catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPageData {
    /// Catalog entries in numeric id order.
    pub challenges: Vec<CatalogEntry>,
}

impl PageLoader for CatalogPage {
    type Params<'a> = ();
    type Payload = Vec<CatalogEntry>;
    type Data = CatalogPageData;

    const SSR: bool = true;

    fn endpoint(_: ()) -> Vec<String> {
        vec!["api".to_string(), "challenges".to_string()]
    }

    fn into_data(challenges: Vec<CatalogEntry>) -> CatalogPageData {
        CatalogPageData { challenges }
    }
}

/// Loader of the challenge view, keyed by the `id` route parameter.
#[derive(Debug, Clone, Copy)]
pub struct ChallengePage;

/// Data of the challenge view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengePageData {
    /// The challenge being viewed.
    pub challenge: ChallengeDetail,
}

impl PageLoader for ChallengePage {
    type Params<'a> = &'a str;
    type Payload = ChallengeDetail;
    type Data = ChallengePageData;

    const SSR: bool = false;

    fn endpoint(id: &str) -> Vec<String> {
        vec!["api".to_string(), "challenge".to_string(), id.to_string()]
    }

    fn into_data(challenge: ChallengeDetail) -> ChallengePageData {
        ChallengePageData { challenge }
    }
}
