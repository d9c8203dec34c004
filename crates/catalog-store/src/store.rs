//! Catalog listing and challenge reading.
//!
//! Nothing is cached: every call goes back to the filesystem.

use std::{
    io,
    path::{Path, PathBuf},
};

use catalog_core::{
    CatalogEntry, CatalogListing, ChallengeDetail, ChallengeFile, ChallengeId, Config,
    SkippedChallenge,
};
use catalog_markdown::PromptRenderer;
use futures::future::join_all;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};

/// The part of `metadata.json` the catalog needs.
#[derive(Debug, Deserialize)]
struct MetadataLabel {
    label: String,
}

/// Candidate challenge directories under the data root.
#[derive(Debug, Default)]
pub struct Candidates {
    /// Valid challenge ids in numeric order.
    pub ids: Vec<ChallengeId>,
    /// Directories whose name is not a challenge id.
    pub skipped: Vec<SkippedChallenge>,
}

/// Read-only view of a challenge data root.
#[derive(Debug, Clone)]
pub struct ChallengeStore {
    root: PathBuf,
    renderer: PromptRenderer,
}

impl ChallengeStore {
    /// Create a store over `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            renderer: PromptRenderer::new(),
        }
    }

    /// Create a store over the configured data root.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.data.root)
    }

    /// Use a different prompt renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: PromptRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Data root this store reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a challenge.
    pub fn challenge_dir(&self, id: &ChallengeId) -> PathBuf {
        self.root.join(id.as_str())
    }

    /// Path of one file of a challenge.
    pub fn file_path(&self, id: &ChallengeId, file: ChallengeFile) -> PathBuf {
        self.challenge_dir(id).join(file.file_name())
    }

    /// Enumerate challenge directories, sorted by numeric id.
    ///
    /// Plain files and hidden directories are ignored. Directories whose name
    /// is not a challenge id are reported in [`Candidates::skipped`].
    pub async fn candidates(&self) -> Result<Candidates> {
        let mut dir = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StoreError::io(&self.root, e))?;

        let mut candidates = Candidates::default();

        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&self.root, e))?
        {
            let path = entry.path();
            let metadata = match tokio::fs::metadata(&path).await {
                Ok(m) => m,
                Err(e) => {
                    // Dangling symlinks and entries removed mid-listing.
                    debug!(path = %path.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !metadata.is_dir() {
                continue;
            }

            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                candidates.skipped.push(SkippedChallenge {
                    name: name.to_string_lossy().into_owned(),
                    reason: "directory name is not UTF-8".to_string(),
                });
                continue;
            };

            if name.starts_with('.') {
                continue;
            }

            match ChallengeId::parse(name) {
                Ok(id) => candidates.ids.push(id),
                Err(e) => candidates.skipped.push(SkippedChallenge {
                    name: name.to_string(),
                    reason: e.to_string(),
                }),
            }
        }

        candidates.ids.sort();
        Ok(candidates)
    }

    /// List the catalog.
    ///
    /// Ids are ordered before any metadata is read, then all `metadata.json`
    /// files are read concurrently. A challenge whose metadata cannot be used
    /// is moved to [`CatalogListing::skipped`] instead of failing the listing.
    pub async fn list(&self) -> Result<CatalogListing> {
        info!(root = %self.root.display(), "listing challenges");

        let Candidates { ids, mut skipped } = self.candidates().await?;

        let labels = join_all(ids.iter().map(|id| self.read_label(id))).await;

        let mut entries = Vec::with_capacity(ids.len());
        for (id, label) in ids.iter().zip(labels) {
            match label {
                Ok(label) => entries.push(CatalogEntry::new(id, label)),
                Err(e) => {
                    warn!(id = %id, error = %e, "skipping challenge");
                    skipped.push(SkippedChallenge {
                        name: id.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            entries = entries.len(),
            skipped = skipped.len(),
            "challenge listing complete"
        );

        Ok(CatalogListing { entries, skipped })
    }

    /// Read the `label` of a challenge's metadata.
    pub async fn read_label(&self, id: &ChallengeId) -> Result<String> {
        let path = self.file_path(id, ChallengeFile::Metadata);
        let raw = self.read_file(id, ChallengeFile::Metadata).await?;
        let metadata: MetadataLabel =
            serde_json::from_str(&raw).map_err(|source| StoreError::Metadata { path, source })?;
        Ok(metadata.label)
    }

    /// Read one challenge.
    ///
    /// `raw_id` is validated before the filesystem is touched. The four files
    /// are read concurrently and either all succeed or the whole read fails.
    pub async fn read(&self, raw_id: &str) -> Result<ChallengeDetail> {
        let id = ChallengeId::parse(raw_id).map_err(|_| StoreError::InvalidId(raw_id.to_string()))?;
        self.read_challenge(&id).await
    }

    /// Read one challenge by parsed id.
    pub async fn read_challenge(&self, id: &ChallengeId) -> Result<ChallengeDetail> {
        debug!(id = %id, "reading challenge");

        let dir = self.challenge_dir(id);
        match tokio::fs::metadata(&dir).await {
            Ok(m) if m.is_dir() => {}
            Ok(_) => return Err(StoreError::NotFound { id: id.to_string() }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound { id: id.to_string() });
            }
            Err(e) => return Err(StoreError::io(dir, e)),
        }

        let (metadata, prompt, tests, user) = tokio::try_join!(
            self.read_file(id, ChallengeFile::Metadata),
            self.read_file(id, ChallengeFile::Prompt),
            self.read_file(id, ChallengeFile::Tests),
            self.read_file(id, ChallengeFile::User),
        )?;

        let metadata = serde_json::from_str(&metadata).map_err(|source| StoreError::Metadata {
            path: self.file_path(id, ChallengeFile::Metadata),
            source,
        })?;

        Ok(ChallengeDetail {
            metadata,
            prompt: self.renderer.render(&prompt),
            tests,
            user,
        })
    }

    /// Read a challenge file as UTF-8 text.
    pub async fn read_file(&self, id: &ChallengeId, file: ChallengeFile) -> Result<String> {
        let path = self.file_path(id, file);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => StoreError::MissingFile {
                    id: id.to_string(),
                    file,
                },
                io::ErrorKind::InvalidData => StoreError::Encoding { path },
                _ => StoreError::io(path, e),
            })
    }
}
