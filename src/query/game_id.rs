//! Composite game identifiers
//!
//! Game ids travel in a single URL path segment, so the `/` between season and
//! game is escaped as the reserved token `---`: `Season_1---2019-02-18` names
//! `Season_1/2019-02-18`. Only the first occurrence of the token is the
//! separator; the season component can therefore never contain it, while the
//! game component may.

use std::fmt;
use std::str::FromStr;

use crate::content::key::{DocumentKey, GAME_FILE};

use super::error::QueryError;

/// Reserved token standing in for the path separator
pub const GAME_ID_SEPARATOR: &str = "---";

/// Season and game components of a game id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameId {
    season: String,
    game: String,
}

impl GameId {
    /// Build an id from its components
    pub fn new(season: impl Into<String>, game: impl Into<String>) -> Result<Self, QueryError> {
        let season = season.into();
        let game = game.into();

        if !valid_component(&season) || season.contains(GAME_ID_SEPARATOR) || !valid_component(&game)
        {
            return Err(QueryError::MalformedIdentifier(format!(
                "{}{}{}",
                season, GAME_ID_SEPARATOR, game
            )));
        }

        Ok(Self { season, game })
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    pub fn game(&self) -> &str {
        &self.game
    }

    /// Key of the full game document this id names
    pub fn document_key(&self) -> DocumentKey {
        DocumentKey::game(self.season.as_str(), self.game.as_str(), GAME_FILE)
    }
}

impl FromStr for GameId {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(QueryError::missing("gameID", "/game/{gameID}"));
        }

        let (season, game) = s
            .split_once(GAME_ID_SEPARATOR)
            .ok_or_else(|| QueryError::MalformedIdentifier(s.to_string()))?;

        Self::new(season, game).map_err(|_| QueryError::MalformedIdentifier(s.to_string()))
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.season, GAME_ID_SEPARATOR, self.game)
    }
}

fn valid_component(part: &str) -> bool {
    !part.is_empty() && part != "." && part != ".." && !part.contains(['/', '\\'])
}
