//! Challenge Catalog Core Library
//!
//! Domain types, configuration, and error handling shared by the catalog
//! store, server, and client crates.

pub mod challenge;
pub mod config;
pub mod error;

pub use challenge::{
    CatalogEntry, CatalogListing, ChallengeDetail, ChallengeFile, ChallengeId, SkippedChallenge,
};
pub use config::Config;
pub use error::{CoreError, Result};
