//! Game server
//!
//! Wires the content store, query service and event hub together and serves
//! them over HTTP.

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::content::ContentStore;
use crate::error::Result;
use crate::hub::{self, BroadcastLoop, ConnectionRegistry, EventSender};
use crate::query::QueryService;
use crate::server::config::ServerConfig;
use crate::server::routes::{self, AppState};
use crate::server::socket::WsSink;
use crate::stats::HubStats;

/// Quiz content and buzzer server
pub struct GameServer {
    config: ServerConfig,
    queries: QueryService,
    registry: Arc<ConnectionRegistry<WsSink>>,
    events: EventSender,
    broadcast: BroadcastLoop<WsSink>,
}

impl GameServer {
    /// Load the content tree named by `config` and build the server
    ///
    /// Fails if the content tree cannot be fully loaded.
    pub fn load(config: ServerConfig) -> Result<Self> {
        tracing::info!(root = %config.content_root.display(), "Creating games cache");
        let store = ContentStore::load_with(&config.content_root, config.load_options)?;
        Ok(Self::new(config, Arc::new(store)))
    }

    /// Build the server around an already loaded store
    pub fn new(config: ServerConfig, store: Arc<ContentStore>) -> Self {
        let stats = Arc::new(HubStats::new());
        let registry = Arc::new(ConnectionRegistry::with_stats(stats));
        let (events, receiver) = hub::channel(config.hub.event_capacity);
        let broadcast = BroadcastLoop::new(receiver, Arc::clone(&registry), config.hub.clone());

        Self {
            config,
            queries: QueryService::new(store),
            registry,
            events,
            broadcast,
        }
    }

    /// Handle for button producers
    pub fn event_sender(&self) -> EventSender {
        self.events.clone()
    }

    /// Get a reference to the connection registry
    pub fn registry(&self) -> &Arc<ConnectionRegistry<WsSink>> {
        &self.registry
    }

    pub fn queries(&self) -> &QueryService {
        &self.queries
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// HTTP router for this server
    pub fn router(&self) -> Router {
        let state = AppState::new(self.queries.clone(), Arc::clone(&self.registry));
        let static_root = self
            .config
            .serve_static
            .then(|| self.queries.store().root());
        routes::router(state, static_root)
    }

    /// Run the server
    ///
    /// This method blocks until the server fails.
    pub async fn run(self) -> Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Run the server with graceful shutdown
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let GameServer {
            registry,
            events,
            broadcast,
            ..
        } = self;

        tracing::info!(addr = %listener.local_addr()?, "Game server listening");
        let broadcast_handle = broadcast.spawn();

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                tracing::info!("Shutdown signal received");
            })
            .await;

        // Stop broadcasting on shutdown
        broadcast_handle.abort();
        drop(events);

        let connections = registry.len().await;
        tracing::info!(connections = connections, "Game server stopped");

        result.map_err(Into::into)
    }
}
