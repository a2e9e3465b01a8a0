//! Server configuration

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::content::LoadOptions;
use crate::hub::HubConfig;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Default content root, relative to the working directory
pub const DEFAULT_CONTENT_ROOT: &str = "games";

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Root of the season/game content tree
    pub content_root: PathBuf,

    /// Content ingestion options
    pub load_options: LoadOptions,

    /// Event bus and broadcast settings
    pub hub: HubConfig,

    /// Serve files under the content root for paths no route matches
    pub serve_static: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            content_root: PathBuf::from(DEFAULT_CONTENT_ROOT),
            load_options: LoadOptions::default(),
            hub: HubConfig::default(),
            serve_static: true,
        }
    }
}

impl ServerConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the content root
    pub fn content_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.content_root = root.into();
        self
    }

    /// Fail startup on malformed JSON instead of at request time
    pub fn strict_content(mut self) -> Self {
        self.load_options = self.load_options.strict();
        self
    }

    /// Set the event bus capacity
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.hub = self.hub.event_capacity(capacity);
        self
    }

    /// Set the per-connection write timeout
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.hub = self.hub.write_timeout(timeout);
        self
    }

    /// Disable the static file fallback
    pub fn disable_static_files(mut self) -> Self {
        self.serve_static = false;
        self
    }
}

/// Parse a listen address
///
/// Accepts a full socket address, or the `:port` shorthand which binds all
/// interfaces.
pub fn parse_listen_addr(s: &str) -> Result<SocketAddr, AddrParseError> {
    match s.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{}", port).parse(),
        None => s.parse(),
    }
}
