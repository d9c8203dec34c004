//! Challenge Catalog Markdown Library
//!
//! Renders challenge prompts from CommonMark (with the GFM extensions) to HTML.

pub mod markdown;

pub use markdown::{Heading, PromptRenderer};
