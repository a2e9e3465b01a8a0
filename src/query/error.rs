//! Query error types
//!
//! Each variant maps to one HTTP status. Errors are per-request and never
//! affect other requests or the store.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// A required path parameter was empty
    #[error("{name} missing - usage '{usage}'")]
    MissingParameter {
        name: &'static str,
        usage: &'static str,
    },

    /// A game identifier that does not follow `<season>---<game>`
    #[error("malformed game id '{0}', expected '<season>---<game>'")]
    MalformedIdentifier(String),

    /// No document under the requested key
    #[error("{0} not found")]
    NotFound(String),

    /// Stored bytes could not be composed into a JSON response
    #[error("failed to compose response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QueryError {
    pub fn missing(name: &'static str, usage: &'static str) -> Self {
        Self::MissingParameter { name, usage }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::MissingParameter { .. } | QueryError::MalformedIdentifier(_) => {
                StatusCode::BAD_REQUEST
            }
            QueryError::NotFound(_) => StatusCode::NOT_FOUND,
            QueryError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller is at fault
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Query failed");
        } else {
            tracing::debug!(error = %self, "Query rejected");
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
