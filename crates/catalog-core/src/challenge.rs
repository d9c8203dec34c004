//! Challenge types and the projections served by the catalog.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifier of a challenge, taken from its directory name.
///
/// The directory name is kept verbatim (leading zeros included) while ordering
/// follows the numeric value, so `"2"` sorts before `"10"`. Values are compared
/// as digit strings, so ids of any length are accepted. Equal numeric values
/// fall back to comparing the raw name to keep ordering total.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChallengeId {
    raw: String,
}

impl ChallengeId {
    /// Parse a directory name or route segment into a challenge id.
    ///
    /// Only non-empty runs of ASCII digits are accepted, which also rules out
    /// anything that could escape the data root (`..`, separators).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::invalid_id(raw));
        }

        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// Numeric value in canonical form: the digits without leading zeros.
    pub fn number(&self) -> &str {
        match self.raw.trim_start_matches('0') {
            "" => "0",
            digits => digits,
        }
    }

    /// Directory name exactly as found on disk.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Client-side route of the challenge page.
    pub fn url_path(&self) -> String {
        format!("/challenge/{}", self.raw)
    }
}

impl Ord for ChallengeId {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.number(), other.number());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for ChallengeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ChallengeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ChallengeId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ChallengeId> for String {
    fn from(id: ChallengeId) -> Self {
        id.raw
    }
}

/// The files making up a challenge directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeFile {
    /// `metadata.json`, a JSON object carrying at least a `label`.
    Metadata,
    /// `prompt.md`, the markdown prompt.
    Prompt,
    /// `tests.ts`, the test source.
    Tests,
    /// `user.ts`, the starter source.
    User,
}

impl ChallengeFile {
    /// Every file a complete challenge directory contains.
    pub const ALL: [ChallengeFile; 4] = [Self::Metadata, Self::Prompt, Self::Tests, Self::User];

    /// File name inside the challenge directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata.json",
            Self::Prompt => "prompt.md",
            Self::Tests => "tests.ts",
            Self::User => "user.ts",
        }
    }
}

impl fmt::Display for ChallengeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// One row of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Challenge id as it appears on disk.
    pub id: String,
    /// Display name, the `label` of the challenge metadata.
    pub name: String,
    /// Client-side route of the challenge page.
    pub url: String,
}

impl CatalogEntry {
    /// Build the entry for a challenge from its metadata label.
    pub fn new(id: &ChallengeId, label: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: label.into(),
            url: id.url_path(),
        }
    }
}

/// A candidate directory left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedChallenge {
    /// Directory name under the data root.
    pub name: String,
    /// Why it was left out.
    pub reason: String,
}

/// Result of listing the data root: the catalog plus whatever failed to load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogListing {
    /// Entries ordered by numeric id.
    pub entries: Vec<CatalogEntry>,
    /// Directories that could not be projected into an entry.
    pub skipped: Vec<SkippedChallenge>,
}

impl CatalogListing {
    /// Whether any candidate directory was left out.
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Everything the challenge page needs, read from one challenge directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeDetail {
    /// Parsed `metadata.json`, passed through unmodified.
    pub metadata: serde_json::Value,
    /// `prompt.md` rendered to HTML.
    pub prompt: String,
    /// `tests.ts`, verbatim.
    pub tests: String,
    /// `user.ts`, verbatim.
    pub user: String,
}
