//! Room registries for peer rendezvous
//!
//! Two independent registries map caller-supplied room ids to connection
//! membership: [`RoomRegistry`] for WebRTC signaling rooms (ordered
//! membership) and [`ChatRegistry`] for chat rooms (set membership). Both
//! enforce the same capacity cap — two peers by default — and delete a room
//! the moment it becomes empty.
//!
//! # Architecture
//!
//! ```text
//!                    Arc<RoomRegistry>                Arc<ChatRegistry>
//!               ┌───────────────────────┐        ┌───────────────────────┐
//!               │ rooms: HashMap<       │        │ rooms: HashMap<       │
//!               │   String,             │        │   String,             │
//!               │   RoomEntry {         │        │   HashSet<ConnId>     │
//!               │     members: Vec,     │        │ >                     │
//!               │   }                   │        └───────────┬───────────┘
//!               │ >                     │                    │
//!               └───────────┬───────────┘                    ▼
//!                           │                         message targets
//!                           ▼                      (all members, sender
//!                    relay targets                      included)
//!              (other members, sender
//!                     excluded)
//! ```
//!
//! The registries hold membership only; delivery happens in the server layer
//! against the peer map, so no registry operation ever blocks on I/O.
//!
//! The original event loop this design comes from was single-threaded; on a
//! multi-threaded runtime each registry is guarded by its own
//! `tokio::sync::RwLock` so every operation stays individually atomic.

pub mod chat;
pub mod config;
pub mod error;
pub mod room;
pub mod store;

pub use chat::ChatRegistry;
pub use config::RegistryConfig;
pub use error::RegistryError;
pub use room::{RoomEntry, RoomPhase};
pub use store::{JoinOutcome, RoomRegistry};
