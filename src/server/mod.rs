//! WebSocket server: accept loop, connection handling, and event dispatch

pub mod config;
pub mod connection;
pub mod listener;
pub mod peers;
pub mod relay;

pub use config::ServerConfig;
pub use listener::SignalServer;
pub use peers::PeerMap;
pub use relay::Relay;
