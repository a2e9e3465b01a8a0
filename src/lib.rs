//! # jgame-rs
//!
//! Quiz game content server with a live buzzer broadcast.
//!
//! Pre-recorded seasons and games are loaded once from a directory tree of
//! JSON documents and served read-only over HTTP. Buzzer hits are queued on
//! a bounded event bus and fanned out to every connected websocket viewer.
//!
//! ```no_run
//! use jgame_rs::{GameServer, ServerConfig};
//!
//! # async fn run() -> jgame_rs::Result<()> {
//! let server = GameServer::load(ServerConfig::default().content_root("games"))?;
//! let buttons = server.event_sender();
//! jgame_rs::input::spawn_console_input(buttons)?;
//! server.run().await
//! # }
//! ```

pub mod content;
pub mod error;
pub mod hub;
pub mod input;
pub mod query;
pub mod server;
pub mod stats;

pub use content::{ContentStore, DocumentKey, LoadOptions};
pub use error::{Error, Result};
pub use hub::{ButtonColor, ButtonHit, EventSender, HubConfig};
pub use query::{GameId, QueryError, QueryService};
pub use server::{GameServer, ServerConfig};
