//! Season and game lookups
//!
//! `QueryService` answers the read API against an immutable
//! [`ContentStore`](crate::content::ContentStore). Results are ordered by
//! document key, descending, so repeated calls always return the same order.

pub mod error;
pub mod game_id;
pub mod service;

pub use error::QueryError;
pub use game_id::{GameId, GAME_ID_SEPARATOR};
pub use service::{DocumentList, QueryService};
