//! Challenge Catalog Store Library
//!
//! Reads challenges from a data root laid out as one directory per challenge:
//!
//! ```text
//! data/2023/
//! ├── 1/
//! │   ├── metadata.json
//! │   ├── prompt.md
//! │   ├── tests.ts
//! │   └── user.ts
//! └── 2/
//!     └── ...
//! ```
//!
//! # Modules
//!
//! - [`error`] - Store errors and their classification
//! - [`store`] - Catalog listing and challenge reading

pub mod error;
pub mod store;

pub use error::{ErrorKind, Result, StoreError};
pub use store::{Candidates, ChallengeStore};
