//! Signaling relay server for two-party WebRTC rooms
//!
//! A WebSocket server that acts as a rendezvous point between exactly two
//! peers: connections join a named room, and once the room is full the server
//! relays their WebRTC negotiation messages (offer/answer/ICE candidates)
//! verbatim. A separate `/chat` namespace carries text chat with
//! echo-to-sender semantics, and a doctor presence directory supports
//! best-effort emergency fan-out to every registered doctor.
//!
//! All state is in-memory and lives only as long as the process; there is no
//! persistence, no reconnection recovery, and no delivery acknowledgement.
//!
//! # Example
//!
//! ```no_run
//! use signal_rs::{ServerConfig, SignalServer};
//!
//! #[tokio::main]
//! async fn main() -> signal_rs::Result<()> {
//!     let config = ServerConfig::with_addr("127.0.0.1:3001".parse().unwrap());
//!     let server = SignalServer::new(config);
//!     server.run().await
//! }
//! ```

pub mod directory;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod stats;

/// Server-assigned identifier for a live connection
///
/// Allocated monotonically by the listener; valid from connect to disconnect.
pub type ConnId = u64;

pub use directory::DoctorDirectory;
pub use error::{Error, Result};
pub use registry::{ChatRegistry, JoinOutcome, RegistryConfig, RegistryError, RoomRegistry};
pub use server::{ServerConfig, SignalServer};
pub use stats::ServerStats;
