//! SyncRoom relay server.
//!
//! Serves the web client from a static directory and relays room events over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin syncroom-server
//! cargo run --bin syncroom-server -- --port 8080 --static-dir ./public
//! PORT=8080 cargo run --bin syncroom-server
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use syncroom_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{AppState, Server},
};
use syncroom_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "syncroom-server")]
#[command(about = "Watch-together room relay server (playback sync, chat, voice signaling)", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Directory of static assets served for non-API paths
    #[arg(short = 's', long, env = "STATIC_DIR", default_value = "public")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(
        &[env!("CARGO_CRATE_NAME"), "syncroom_server", "tower_http"],
        "debug",
    );

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases (AppState)
    // 4. Server

    // 1. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let state = AppState::new(repository, message_pusher, Arc::new(SystemClock));

    // 4. Create and run the server
    let server = Server::new(state, args.static_dir);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
