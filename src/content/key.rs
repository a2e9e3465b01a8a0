//! Typed document keys
//!
//! Documents are identified by where they sit in the content tree. Instead of
//! counting separators in a full path at lookup time, every file is
//! classified once at ingestion into a `DocumentKey`.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Component, Path};

/// File name of season and game overview documents
pub const OVERVIEW_FILE: &str = "overview.json";

/// File name of full game documents
pub const GAME_FILE: &str = "game.json";

/// Extension marking a file as a content document
pub const DOCUMENT_EXTENSION: &str = "json";

/// Role of a document, derived from its file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// `overview.json`
    Overview,
    /// `game.json`
    Game,
    /// Any other `.json` file at game depth
    Other,
}

impl DocumentKind {
    fn from_file_name(file: &str) -> Self {
        match file {
            OVERVIEW_FILE => DocumentKind::Overview,
            GAME_FILE => DocumentKind::Game,
            _ => DocumentKind::Other,
        }
    }
}

/// Key of a document relative to the content root
///
/// Keys order by their canonical `season[/game]/file` form, which keeps the
/// ordering identical to sorting the relative paths as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    season: String,
    game: Option<String>,
    file: String,
    path: String,
}

impl DocumentKey {
    /// Key of a season-level document
    pub fn season(season: impl Into<String>, file: impl Into<String>) -> Self {
        let season = season.into();
        let file = file.into();
        let path = format!("{}/{}", season, file);
        Self {
            season,
            game: None,
            file,
            path,
        }
    }

    /// Key of a game-level document
    pub fn game(
        season: impl Into<String>,
        game: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        let season = season.into();
        let game = game.into();
        let file = file.into();
        let path = format!("{}/{}/{}", season, game, file);
        Self {
            season,
            game: Some(game),
            file,
            path,
        }
    }

    /// Classify a path relative to the content root
    ///
    /// Returns `None` for anything that is not a content document at season
    /// depth (`season/overview.json`) or game depth (`season/game/*.json`).
    pub fn classify(relative: &Path) -> Option<Self> {
        if relative.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXTENSION) {
            return None;
        }

        let mut parts = Vec::with_capacity(3);
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_str()?),
                _ => return None,
            }
        }

        match parts.as_slice() {
            [season, file] if *file == OVERVIEW_FILE => Some(Self::season(*season, *file)),
            [season, game, file] => Some(Self::game(*season, *game, *file)),
            _ => None,
        }
    }

    pub fn season_id(&self) -> &str {
        &self.season
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game.as_deref()
    }

    pub fn file_name(&self) -> &str {
        &self.file
    }

    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_file_name(&self.file)
    }

    /// Whether this is a game-level document belonging to `season`
    pub fn is_game_of(&self, season: &str) -> bool {
        self.game.is_some() && self.season == season
    }

    /// Canonical `season[/game]/file` form
    pub fn as_str(&self) -> &str {
        &self.path
    }
}

impl Ord for DocumentKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl PartialOrd for DocumentKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
