//! Simple signaling server
//!
//! Run with: cargo run --example signal_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example signal_server                  # binds to 0.0.0.0:3001
//!   cargo run --example signal_server 127.0.0.1:9000   # binds to 127.0.0.1:9000
//!
//! ## Connecting
//!
//! Video signaling clients connect to ws://localhost:3001/ and chat clients
//! to ws://localhost:3001/chat. Events are JSON text frames:
//!
//!   {"event": "join-room", "data": {"roomId": "r1"}}
//!   {"event": "offer", "data": {"roomId": "r1", "offer": {...}}}
//!   {"event": "doctorConnect", "data": {"doctorId": "d1"}}
//!   {"event": "emergencyRequest", "data": {"name": "John"}}
//!
//! The first two connections joining a room each receive `ready`; a third
//! receives `room-full`. Ctrl-C shuts down and prints the final counters.

use std::net::SocketAddr;

use signal_rs::{ServerConfig, SignalServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> signal_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("signal_rs=info")),
        )
        .init();

    let bind_addr: SocketAddr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "0.0.0.0:3001".to_string())
        .parse()
        .expect("invalid bind address");

    let server = SignalServer::new(ServerConfig::with_addr(bind_addr));

    server
        .run_until(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    let stats = server.stats();
    println!(
        "Stats: connections={} signals={} chat={} emergencies={}",
        stats.total_connections,
        stats.signals_relayed,
        stats.chat_messages,
        stats.emergency_notifications,
    );

    Ok(())
}
