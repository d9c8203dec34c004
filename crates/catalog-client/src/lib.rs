//! Challenge Catalog Client
//!
//! Page loaders for the two catalog views. Each loader issues one request and
//! hands the view a [`LoadState`]: either the data or a typed [`LoadError`].
//!
//! ```no_run
//! use catalog_client::{CatalogClient, LoadState};
//!
//! # async fn demo() -> Result<(), catalog_client::LoadError> {
//! let client = CatalogClient::new("http://127.0.0.1:3000")?;
//! match client.load_catalog().await {
//!     LoadState::Loaded(page) => println!("{} challenges", page.challenges.len()),
//!     LoadState::Failed(e) => eprintln!("catalog unavailable: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod loader;

pub use client::{CatalogClient, LoadError};
pub use loader::{
    CatalogPage, CatalogPageData, ChallengePage, ChallengePageData, LoadState, PageLoader,
};
