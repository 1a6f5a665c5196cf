//! Signaling room registry
//!
//! The central registry that pairs connections into two-party rooms and
//! resolves relay targets for WebRTC negotiation messages.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::ConnId;

use super::config::RegistryConfig;
use super::error::RegistryError;
use super::room::RoomEntry;

/// Outcome of a successful join
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// Joined below capacity; waiting for a peer
    Waiting,
    /// The join brought the room to capacity; every listed member should be
    /// signaled that negotiation may begin
    Ready(Vec<ConnId>),
    /// The connection was already a member; no membership change
    ///
    /// The behavior this registry was modeled on appended a duplicate entry
    /// here, which would break the capacity invariant. Re-join is idempotent
    /// instead; the deviation is documented in DESIGN.md.
    AlreadyJoined,
}

/// Registry of signaling rooms
///
/// Thread-safe via `RwLock`; each operation runs under the lock, so joins,
/// relays, and disconnect sweeps are individually atomic.
pub struct RoomRegistry {
    /// Map of room id to room entry
    rooms: RwLock<HashMap<String, RoomEntry>>,

    /// Configuration
    config: RegistryConfig,
}

impl RoomRegistry {
    /// Create a new registry with default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a new registry with custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Join a room, creating it on first use
    ///
    /// Room ids are arbitrary caller-supplied strings; colliding ids from
    /// different logical sessions will merge their peers. Returns
    /// `RegistryError::RoomFull` when the room is already at capacity; the
    /// caller signals the rejected joiner only, membership is unchanged.
    pub async fn join(&self, room_id: &str, conn: ConnId) -> Result<JoinOutcome, RegistryError> {
        let mut rooms = self.rooms.write().await;

        let room = rooms
            .entry(room_id.to_string())
            .or_insert_with(|| RoomEntry::new(self.config.room_capacity));

        if room.contains(conn) {
            tracing::debug!(room = %room_id, conn_id = conn, "Re-join ignored");
            return Ok(JoinOutcome::AlreadyJoined);
        }

        if room.is_full() {
            tracing::warn!(
                room = %room_id,
                conn_id = conn,
                members = room.len(),
                "Join rejected: room full"
            );
            return Err(RegistryError::RoomFull(room_id.to_string()));
        }

        room.push(conn);

        tracing::info!(
            room = %room_id,
            conn_id = conn,
            members = room.len(),
            "Peer joined room"
        );

        if room.is_full() {
            Ok(JoinOutcome::Ready(room.members().to_vec()))
        } else {
            Ok(JoinOutcome::Waiting)
        }
    }

    /// Resolve the relay targets for a message from `sender` in `room_id`
    ///
    /// Returns every member except the sender. An unknown room, or a room
    /// where the sender sits alone, yields no targets — the message is
    /// dropped, fire-and-forget.
    pub async fn relay_targets(&self, room_id: &str, sender: ConnId) -> Vec<ConnId> {
        let rooms = self.rooms.read().await;

        match rooms.get(room_id) {
            Some(room) => room
                .members()
                .iter()
                .copied()
                .filter(|&m| m != sender)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Remove a connection from every room it is a member of
    ///
    /// Rooms left empty are deleted immediately. Returns the number of rooms
    /// the connection was removed from.
    pub async fn remove_connection(&self, conn: ConnId) -> usize {
        let mut rooms = self.rooms.write().await;

        let mut removed = 0;
        rooms.retain(|room_id, room| {
            if room.remove(conn) {
                removed += 1;
                if room.is_empty() {
                    tracing::info!(room = %room_id, "Room deleted (last peer left)");
                    return false;
                }
                tracing::info!(
                    room = %room_id,
                    conn_id = conn,
                    members = room.len(),
                    "Peer left room"
                );
            }
            true
        });

        removed
    }

    /// Get the members of a room in join order, if it exists
    pub async fn members(&self, room_id: &str) -> Option<Vec<ConnId>> {
        let rooms = self.rooms.read().await;
        rooms.get(room_id).map(|room| room.members().to_vec())
    }

    /// Get total number of rooms
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
