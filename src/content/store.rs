//! Content store implementation
//!
//! Walks the content root once and indexes every document by its typed key.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use walkdir::WalkDir;

use super::error::LoadError;
use super::key::DocumentKey;

/// Raw JSON document as read from disk
///
/// Cheap to clone due to `Bytes` reference counting.
pub type Document = Bytes;

/// Options controlling ingestion
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Parse every document at load time and fail on malformed JSON.
    ///
    /// Off by default: documents are stored raw and only checked when they
    /// are composed into a response.
    pub validate_json: bool,
}

impl LoadOptions {
    /// Enable load-time JSON validation
    pub fn strict(mut self) -> Self {
        self.validate_json = true;
        self
    }
}

/// Immutable index of all season and game documents
#[derive(Debug, Clone, PartialEq)]
pub struct ContentStore {
    root: PathBuf,
    seasons: BTreeMap<DocumentKey, Document>,
    games: BTreeMap<DocumentKey, Document>,
}

impl ContentStore {
    /// Load the tree under `root` with default options
    pub fn load(root: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::load_with(root, LoadOptions::default())
    }

    /// Load the tree under `root`
    ///
    /// Any traversal, read or (in strict mode) parse failure aborts the whole
    /// load. There is no partially built store.
    pub fn load_with(root: impl AsRef<Path>, options: LoadOptions) -> Result<Self, LoadError> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(LoadError::RootNotDirectory(root.to_path_buf()));
        }

        let mut seasons = BTreeMap::new();
        let mut games = BTreeMap::new();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry?;
            let path = entry.path();

            // Symlinked documents are loaded, symlinked directories are not walked
            let is_file =
                entry.file_type().is_file() || (entry.path_is_symlink() && path.is_file());
            if !is_file {
                continue;
            }

            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };

            let Some(key) = DocumentKey::classify(relative) else {
                tracing::trace!(path = %path.display(), "Skipping non-document file");
                continue;
            };

            let data = std::fs::read(path).map_err(|source| LoadError::Read {
                path: path.to_path_buf(),
                source,
            })?;

            if options.validate_json {
                serde_json::from_slice::<serde::de::IgnoredAny>(&data).map_err(|source| {
                    LoadError::InvalidJson {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
            }

            tracing::trace!(key = %key, bytes = data.len(), "Document loaded");

            if key.game_id().is_some() {
                games.insert(key, Bytes::from(data));
            } else {
                seasons.insert(key, Bytes::from(data));
            }
        }

        tracing::info!(
            root = %root.display(),
            seasons = seasons.len(),
            games = games.len(),
            "Content store loaded"
        );

        Ok(Self {
            root: root.to_path_buf(),
            seasons,
            games,
        })
    }

    /// Build a store from already keyed documents
    ///
    /// Season-level and game-level keys are routed to their index the same
    /// way `load` routes files.
    pub fn from_documents<I>(root: impl Into<PathBuf>, documents: I) -> Self
    where
        I: IntoIterator<Item = (DocumentKey, Document)>,
    {
        let mut seasons = BTreeMap::new();
        let mut games = BTreeMap::new();

        for (key, doc) in documents {
            if key.game_id().is_some() {
                games.insert(key, doc);
            } else {
                seasons.insert(key, doc);
            }
        }

        Self {
            root: root.into(),
            seasons,
            games,
        }
    }

    /// Content root the store was loaded from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Season-level documents in ascending key order
    pub fn seasons(&self) -> impl DoubleEndedIterator<Item = (&DocumentKey, &Document)> {
        self.seasons.iter()
    }

    /// Game-level documents in ascending key order
    pub fn games(&self) -> impl DoubleEndedIterator<Item = (&DocumentKey, &Document)> {
        self.games.iter()
    }

    pub fn season(&self, key: &DocumentKey) -> Option<&Document> {
        self.seasons.get(key)
    }

    pub fn game(&self, key: &DocumentKey) -> Option<&Document> {
        self.games.get(key)
    }

    pub fn season_count(&self) -> usize {
        self.seasons.len()
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }
}
