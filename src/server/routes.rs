//! HTTP routes
//!
//! | Path | Description |
//! |------|-------------|
//! | `/seasons` | All season overviews |
//! | `/season/{season_id}` | Game overviews of one season |
//! | `/game/{game_id}` | One full game, id is `<season>---<game>` |
//! | `/socket` | Websocket carrying live button hits |
//! | `/stats` | Hub counters |
//! | anything else | Static files from the content root (optional) |

use std::path::Path;
use std::sync::Arc;

use axum::extract::{Path as UrlPath, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bytes::Bytes;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::hub::ConnectionRegistry;
use crate::query::{QueryError, QueryService};
use crate::stats::HubStatsSnapshot;

use super::socket::{self, WsSink};

/// Shared state passed to all request handlers
#[derive(Clone)]
pub struct AppState {
    pub(crate) queries: QueryService,
    pub(crate) registry: Arc<ConnectionRegistry<WsSink>>,
}

impl AppState {
    pub fn new(queries: QueryService, registry: Arc<ConnectionRegistry<WsSink>>) -> Self {
        Self { queries, registry }
    }
}

/// Build the router
///
/// With `static_root` set, unmatched paths are served from that directory.
pub fn router(state: AppState, static_root: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/seasons", get(list_seasons))
        .route("/season/", get(missing_season))
        .route("/season/{season_id}", get(list_games))
        .route("/game/", get(missing_game))
        .route("/game/{game_id}", get(get_game))
        .route("/socket", get(socket::subscribe))
        .route("/stats", get(stats));

    let router = match static_root {
        Some(root) => router.fallback_service(ServeDir::new(root)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn json(body: Bytes) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn list_seasons(State(state): State<AppState>) -> Result<Response, QueryError> {
    let body = state.queries.list_seasons().to_json()?;
    Ok(json(body))
}

async fn list_games(
    State(state): State<AppState>,
    UrlPath(season_id): UrlPath<String>,
) -> Result<Response, QueryError> {
    let body = state.queries.list_games(&season_id)?.to_json()?;
    Ok(json(body))
}

async fn get_game(
    State(state): State<AppState>,
    UrlPath(game_id): UrlPath<String>,
) -> Result<Response, QueryError> {
    let body = state.queries.get_game(&game_id)?;
    Ok(json(body))
}

async fn missing_season() -> QueryError {
    QueryError::missing("seasonID", "/season/{seasonID}")
}

async fn missing_game() -> QueryError {
    QueryError::missing("gameID", "/game/{gameID}")
}

async fn stats(State(state): State<AppState>) -> Json<HubStatsSnapshot> {
    Json(state.registry.stats().snapshot())
}
