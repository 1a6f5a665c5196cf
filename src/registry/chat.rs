//! Chat room registry
//!
//! A parallel registry in its own namespace: a room id can exist here and in
//! the signaling registry at the same time without collision. Membership is a
//! set rather than a sequence — join order carries no meaning for chat
//! fan-out — and message targets include the sender, which clients rely on to
//! render their own message.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use crate::ConnId;

use super::config::RegistryConfig;
use super::error::RegistryError;
use super::store::JoinOutcome;

/// Registry of chat rooms
pub struct ChatRegistry {
    /// Map of room id to member set
    rooms: RwLock<HashMap<String, HashSet<ConnId>>>,

    /// Configuration
    config: RegistryConfig,
}

impl ChatRegistry {
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

    /// Join a chat room, creating it on first use
    ///
    /// Same capacity semantics as the signaling registry: a join into a full
    /// room is rejected with no membership change.
    pub async fn join(&self, room_id: &str, conn: ConnId) -> Result<JoinOutcome, RegistryError> {
        let mut rooms = self.rooms.write().await;

        let members = rooms.entry(room_id.to_string()).or_default();

        if members.contains(&conn) {
            tracing::debug!(room = %room_id, conn_id = conn, "Chat re-join ignored");
            return Ok(JoinOutcome::AlreadyJoined);
        }

        if members.len() >= self.config.room_capacity {
            tracing::warn!(
                room = %room_id,
                conn_id = conn,
                members = members.len(),
                "Chat join rejected: room full"
            );
            return Err(RegistryError::RoomFull(room_id.to_string()));
        }

        members.insert(conn);

        tracing::info!(
            room = %room_id,
            conn_id = conn,
            members = members.len(),
            "Peer joined chat room"
        );

        if members.len() >= self.config.room_capacity {
            Ok(JoinOutcome::Ready(members.iter().copied().collect()))
        } else {
            Ok(JoinOutcome::Waiting)
        }
    }

    /// Resolve the broadcast targets for a message in `room_id`
    ///
    /// Every member of the room, sender included. An unknown room yields no
    /// targets.
    pub async fn message_targets(&self, room_id: &str) -> Vec<ConnId> {
        let rooms = self.rooms.read().await;

        match rooms.get(room_id) {
            Some(members) => members.iter().copied().collect(),
            None => Vec::new(),
        }
    }

    /// Remove a connection from every chat room it is a member of
    ///
    /// Rooms left empty are deleted immediately. Returns the number of rooms
    /// the connection was removed from.
    pub async fn remove_connection(&self, conn: ConnId) -> usize {
        let mut rooms = self.rooms.write().await;

        let mut removed = 0;
        rooms.retain(|room_id, members| {
            if members.remove(&conn) {
                removed += 1;
                if members.is_empty() {
                    tracing::info!(room = %room_id, "Chat room deleted (last peer left)");
                    return false;
                }
            }
            true
        });

        removed
    }

    /// Get total number of chat rooms
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl Default for ChatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RoomRegistry;

    #[tokio::test]
    async fn test_message_targets_include_sender() {
        let registry = ChatRegistry::new();

        registry.join("c1", 1).await.unwrap();
        registry.join("c1", 2).await.unwrap();

        let mut targets = registry.message_targets("c1").await;
        targets.sort_unstable();
        assert_eq!(targets, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_third_join_rejected() {
        let registry = ChatRegistry::new();

        registry.join("c1", 1).await.unwrap();
        registry.join("c1", 2).await.unwrap();

        let result = registry.join("c1", 3).await;
        assert!(matches!(result, Err(RegistryError::RoomFull(_))));

        let mut targets = registry.message_targets("c1").await;
        targets.sort_unstable();
        assert_eq!(targets, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_rejoin_is_idempotent() {
        let registry = ChatRegistry::new();

        registry.join("c1", 1).await.unwrap();
        let outcome = registry.join("c1", 1).await.unwrap();

        assert_eq!(outcome, JoinOutcome::AlreadyJoined);
        assert_eq!(registry.message_targets("c1").await, vec![1]);
    }

    #[tokio::test]
    async fn test_disconnect_deletes_emptied_rooms() {
        let registry = ChatRegistry::new();

        registry.join("c1", 1).await.unwrap();
        registry.join("c2", 1).await.unwrap();
        registry.join("c2", 2).await.unwrap();

        let removed = registry.remove_connection(1).await;
        assert_eq!(removed, 2);

        assert_eq!(registry.room_count().await, 1);
        assert_eq!(registry.message_targets("c2").await, vec![2]);
    }

    #[tokio::test]
    async fn test_namespace_is_independent_of_signaling_rooms() {
        let chat = ChatRegistry::new();
        let rooms = RoomRegistry::new();

        // Same id, different namespaces: both rooms fill independently
        rooms.join("shared", 1).await.unwrap();
        rooms.join("shared", 2).await.unwrap();
        chat.join("shared", 3).await.unwrap();
        chat.join("shared", 4).await.unwrap();

        assert_eq!(rooms.members("shared").await, Some(vec![1, 2]));

        let mut targets = chat.message_targets("shared").await;
        targets.sort_unstable();
        assert_eq!(targets, vec![3, 4]);
    }
}
