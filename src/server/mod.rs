//! HTTP and websocket server

pub mod config;
pub mod listener;
pub mod routes;
pub mod socket;

pub use config::{parse_listen_addr, ServerConfig};
pub use listener::GameServer;
pub use routes::{router, AppState};
pub use socket::WsSink;
