//! Quiz game server
//!
//! Run with: cargo run -- [OPTIONS]
//!
//! Examples:
//!   cargo run                                   # binds to 0.0.0.0:8000, content from ./games
//!   JGAME_SRV_ADDR=:8080 cargo run              # binds to 0.0.0.0:8080
//!   cargo run -- --games /srv/games --strict-content
//!
//! Type `red`, `green`, `blue`, `yellow` (or `r`/`g`/`b`/`y`) on stdin to
//! fire buzzer events at connected `/socket` viewers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use jgame_rs::hub::config::DEFAULT_EVENT_CAPACITY;
use jgame_rs::server::parse_listen_addr;
use jgame_rs::{input, GameServer, ServerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jgame-server")]
#[command(about = "Serves quiz games and relays buzzer hits to live viewers")]
#[command(version)]
struct Cli {
    /// Listen address (`host:port` or `:port`)
    #[arg(long, env = "JGAME_SRV_ADDR", default_value = ":8000", value_parser = parse_listen_addr)]
    addr: SocketAddr,

    /// Root of the season/game content tree
    #[arg(long, env = "JEOPARDY_GAMES", default_value = "games")]
    games: PathBuf,

    /// Events queued before button producers block
    #[arg(long, default_value_t = DEFAULT_EVENT_CAPACITY)]
    event_capacity: usize,

    /// Per-viewer write timeout in milliseconds
    #[arg(long, default_value_t = 2000)]
    write_timeout_ms: u64,

    /// Refuse to start if any document is not valid JSON
    #[arg(long)]
    strict_content: bool,

    /// Do not read button presses from stdin
    #[arg(long)]
    no_console_input: bool,

    /// Do not serve static files from the content root
    #[arg(long)]
    no_static: bool,
}

impl Cli {
    fn server_config(&self) -> ServerConfig {
        let mut config = ServerConfig::with_addr(self.addr)
            .content_root(&self.games)
            .event_capacity(self.event_capacity)
            .write_timeout(Duration::from_millis(self.write_timeout_ms));

        if self.strict_content {
            config = config.strict_content();
        }
        if self.no_static {
            config = config.disable_static_files();
        }

        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jgame_rs=info,jgame_server=info,tower_http=info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Game server starting"
    );

    let server = GameServer::load(cli.server_config())?;

    if !cli.no_console_input {
        input::spawn_console_input(server.event_sender())?;
    }

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
