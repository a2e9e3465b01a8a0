//! Read-only lookups over the content store

use std::sync::Arc;

use bytes::Bytes;
use serde_json::value::RawValue;

use crate::content::{ContentStore, Document, DocumentKind};

use super::error::QueryError;
use super::game_id::GameId;

/// Ordered list of documents, composed into a JSON array on demand
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentList(Vec<Document>);

impl DocumentList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.0
    }

    /// Compose the documents into a JSON array, embedding each one verbatim
    ///
    /// Fails if any stored document is not valid JSON.
    pub fn to_json(&self) -> Result<Bytes, QueryError> {
        let raw = self
            .0
            .iter()
            .map(|doc| serde_json::from_slice::<&RawValue>(doc))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Bytes::from(serde_json::to_vec(&raw)?))
    }
}

impl FromIterator<Document> for DocumentList {
    fn from_iter<T: IntoIterator<Item = Document>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Query service over an immutable content store
///
/// Cloning is cheap; all clones share the same store.
#[derive(Debug, Clone)]
pub struct QueryService {
    store: Arc<ContentStore>,
}

impl QueryService {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<ContentStore> {
        &self.store
    }

    /// All season overviews, newest-looking key first
    pub fn list_seasons(&self) -> DocumentList {
        self.store
            .seasons()
            .rev()
            .map(|(_, doc)| doc.clone())
            .collect()
    }

    /// Game overviews of one season, in descending key order
    ///
    /// An unknown season yields an empty list.
    pub fn list_games(&self, season_id: &str) -> Result<DocumentList, QueryError> {
        if season_id.is_empty() {
            return Err(QueryError::missing("seasonID", "/season/{seasonID}"));
        }

        Ok(self
            .store
            .games()
            .rev()
            .filter(|(key, _)| key.is_game_of(season_id) && key.kind() == DocumentKind::Overview)
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    /// Full game document for a `<season>---<game>` id
    pub fn get_game(&self, game_id: &str) -> Result<Document, QueryError> {
        let id: GameId = game_id.parse()?;
        let key = id.document_key();

        let doc = self
            .store
            .game(&key)
            .ok_or_else(|| QueryError::NotFound(key.to_string()))?;

        serde_json::from_slice::<&RawValue>(doc)?;
        Ok(doc.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::key::{GAME_FILE, OVERVIEW_FILE};
    use crate::content::DocumentKey;

    fn service(docs: Vec<(DocumentKey, &'static str)>) -> QueryService {
        let store = ContentStore::from_documents(
            "games",
            docs.into_iter()
                .map(|(k, v)| (k, Bytes::from_static(v.as_bytes()))),
        );
        QueryService::new(Arc::new(store))
    }

    fn sample() -> QueryService {
        service(vec![
            (DocumentKey::season("Season_1", OVERVIEW_FILE), r#"{"s":1}"#),
            (DocumentKey::season("Season_3", OVERVIEW_FILE), r#"{"s":3}"#),
            (DocumentKey::season("Season_2", OVERVIEW_FILE), r#"{"s":2}"#),
            (
                DocumentKey::game("Season_1", "2019-02-15", OVERVIEW_FILE),
                r#"{"g":"15"}"#,
            ),
            (
                DocumentKey::game("Season_1", "2019-02-15", GAME_FILE),
                r#"{"full":"15"}"#,
            ),
            (
                DocumentKey::game("Season_1", "2019-02-18", OVERVIEW_FILE),
                r#"{"g":"18"}"#,
            ),
            (
                DocumentKey::game("Season_1", "2019-02-18", GAME_FILE),
                r#"{"full":"18"}"#,
            ),
            (
                DocumentKey::game("Season_10", "2020-01-01", OVERVIEW_FILE),
                r#"{"g":"s10"}"#,
            ),
        ])
    }

    #[test]
    fn test_list_seasons_descending() {
        let svc = sample();
        let json = svc.list_seasons().to_json().unwrap();

        assert_eq!(&json[..], br#"[{"s":3},{"s":2},{"s":1}]"#);
    }

    #[test]
    fn test_list_seasons_is_stable() {
        let svc = sample();
        assert_eq!(svc.list_seasons(), svc.list_seasons());
    }

    #[test]
    fn test_list_games_filters_season_and_kind() {
        let svc = sample();
        let games = svc.list_games("Season_1").unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(&games.to_json().unwrap()[..], br#"[{"g":"18"},{"g":"15"}]"#);
    }

    #[test]
    fn test_list_games_does_not_match_season_prefix() {
        let svc = sample();
        let games = svc.list_games("Season_10").unwrap();

        assert_eq!(&games.to_json().unwrap()[..], br#"[{"g":"s10"}]"#);
    }

    #[test]
    fn test_list_games_unknown_season_is_empty() {
        let svc = sample();
        let games = svc.list_games("Season_9").unwrap();

        assert!(games.is_empty());
        assert_eq!(&games.to_json().unwrap()[..], b"[]");
    }

    #[test]
    fn test_list_games_empty_season_is_bad_request() {
        let svc = sample();
        let err = svc.list_games("").unwrap_err();

        assert!(matches!(err, QueryError::MissingParameter { .. }));
    }

    #[test]
    fn test_get_game_resolves_composite_id() {
        let svc = sample();
        let doc = svc.get_game("Season_1---2019-02-18").unwrap();

        let key = DocumentKey::game("Season_1", "2019-02-18", GAME_FILE);
        assert_eq!(&doc, svc.store().game(&key).unwrap());
    }

    #[test]
    fn test_get_game_unknown_is_not_found() {
        let svc = sample();
        let err = svc.get_game("Season_1---2030-01-01").unwrap_err();

        assert!(matches!(err, QueryError::NotFound(_)));
    }

    #[test]
    fn test_get_game_malformed_is_distinct_from_not_found() {
        let svc = sample();
        let err = svc.get_game("Season_1-2019-02-18").unwrap_err();

        assert!(matches!(err, QueryError::MalformedIdentifier(_)));
    }

    #[test]
    fn test_malformed_document_fails_at_compose_time() {
        let svc = service(vec![
            (DocumentKey::season("Season_1", OVERVIEW_FILE), r#"{"ok":true}"#),
            (DocumentKey::season("Season_2", OVERVIEW_FILE), "{broken"),
            (DocumentKey::game("Season_2", "g", GAME_FILE), "nope"),
        ]);

        let err = svc.list_seasons().to_json().unwrap_err();
        assert!(matches!(err, QueryError::Serialization(_)));

        let err = svc.get_game("Season_2---g").unwrap_err();
        assert!(matches!(err, QueryError::Serialization(_)));
    }

    #[test]
    fn test_compose_keeps_documents_verbatim() {
        let svc = service(vec![(
            DocumentKey::season("Season_1", OVERVIEW_FILE),
            r#"{ "b": 2,  "a": 1 }"#,
        )]);

        let json = svc.list_seasons().to_json().unwrap();
        assert_eq!(&json[..], br#"[{ "b": 2,  "a": 1 }]"#);
    }
}
