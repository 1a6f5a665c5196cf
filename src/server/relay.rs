//! Event dispatch
//!
//! [`Relay`] owns the shared state (room registries, doctor directory, peer
//! table, counters) and applies inbound events against it. Registry mutations
//! happen first, under each registry's lock; delivery into peer mailboxes
//! follows, lock-free and best-effort. Nothing here awaits I/O, so every
//! dispatch runs to completion quickly and in arrival order for its
//! connection.

use std::sync::Arc;

use serde::Serialize;
use tokio_tungstenite::tungstenite::Message;

use crate::directory::DoctorDirectory;
use crate::protocol::chat::{ChatClientEvent, ChatServerEvent};
use crate::protocol::event::{ClientEvent, ServerEvent};
use crate::registry::{ChatRegistry, JoinOutcome, RegistryConfig, RegistryError, RoomRegistry};
use crate::stats::RelayStats;
use crate::ConnId;

use super::peers::PeerMap;

/// Shared relay state and event dispatch
pub struct Relay {
    rooms: Arc<RoomRegistry>,
    chat: Arc<ChatRegistry>,
    directory: Arc<DoctorDirectory>,
    peers: Arc<PeerMap>,
    stats: Arc<RelayStats>,
}

impl Relay {
    /// Create a relay with default registry configuration
    pub fn new() -> Self {
        Self::with_registry_config(RegistryConfig::default())
    }

    /// Create a relay with custom registry configuration
    ///
    /// Both registries share the configuration; their state stays separate.
    pub fn with_registry_config(config: RegistryConfig) -> Self {
        Self {
            rooms: Arc::new(RoomRegistry::with_config(config.clone())),
            chat: Arc::new(ChatRegistry::with_config(config)),
            directory: Arc::new(DoctorDirectory::new()),
            peers: Arc::new(PeerMap::new()),
            stats: Arc::new(RelayStats::new()),
        }
    }

    /// Get the signaling room registry
    pub fn rooms(&self) -> &Arc<RoomRegistry> {
        &self.rooms
    }

    /// Get the chat room registry
    pub fn chat_rooms(&self) -> &Arc<ChatRegistry> {
        &self.chat
    }

    /// Get the doctor directory
    pub fn directory(&self) -> &Arc<DoctorDirectory> {
        &self.directory
    }

    /// Get the live peer table
    pub fn peers(&self) -> &Arc<PeerMap> {
        &self.peers
    }

    /// Get the server counters
    pub fn stats(&self) -> &Arc<RelayStats> {
        &self.stats
    }

    /// Handle an event from the default namespace
    pub async fn handle_signal(&self, conn: ConnId, event: ClientEvent) {
        match event {
            ClientEvent::JoinRoom { room_id } => {
                match self.rooms.join(&room_id, conn).await {
                    Ok(JoinOutcome::Ready(members)) => {
                        for member in members {
                            self.send_event(member, &ServerEvent::Ready).await;
                        }
                    }
                    Ok(JoinOutcome::Waiting) | Ok(JoinOutcome::AlreadyJoined) => {}
                    Err(RegistryError::RoomFull(_)) => {
                        // Rejection goes to the failed joiner only
                        self.send_event(conn, &ServerEvent::RoomFull).await;
                    }
                }
            }
            ClientEvent::Offer { room_id, offer } => {
                self.relay_signal(&room_id, conn, ServerEvent::Offer, offer).await;
            }
            ClientEvent::Answer { room_id, answer } => {
                self.relay_signal(&room_id, conn, ServerEvent::Answer, answer).await;
            }
            ClientEvent::IceCandidate { room_id, candidate } => {
                self.relay_signal(&room_id, conn, ServerEvent::IceCandidate, candidate)
                    .await;
            }
            ClientEvent::DoctorConnect { doctor_id } => {
                self.directory.register(&doctor_id, conn).await;
            }
            ClientEvent::EmergencyRequest { name } => {
                self.broadcast_emergency(&name).await;
            }
        }
    }

    /// Handle an event from the `/chat` namespace
    pub async fn handle_chat(&self, conn: ConnId, event: ChatClientEvent) {
        match event {
            ChatClientEvent::JoinRoom { room_id } => {
                match self.chat.join(&room_id, conn).await {
                    // The chat namespace has no ready signal; peers just
                    // start sending once joined.
                    Ok(_) => {}
                    Err(RegistryError::RoomFull(_)) => {
                        self.send_event(conn, &ChatServerEvent::RoomFull).await;
                    }
                }
            }
            ChatClientEvent::UserMessage { room_id, text } => {
                let targets = self.chat.message_targets(&room_id).await;

                let mut delivered = 0u64;
                for target in targets {
                    let event = ChatServerEvent::Message {
                        text: text.clone(),
                        sender: conn,
                    };
                    if self.send_event(target, &event).await {
                        delivered += 1;
                    }
                }
                self.stats.add_chat_messages(delivered);
            }
        }
    }

    /// Push an emergency notification to every registered doctor
    ///
    /// At-most-once, best-effort: whoever is in the directory at the instant
    /// of the snapshot gets one push, with no acknowledgement and no retry.
    pub async fn broadcast_emergency(&self, patient_name: &str) {
        let doctors = self.directory.snapshot().await;

        tracing::info!(
            patient = %patient_name,
            doctors = doctors.len(),
            "Emergency broadcast"
        );

        let event = ServerEvent::emergency(patient_name);
        let mut delivered = 0u64;
        for (doctor_id, conn) in doctors {
            if self.send_event(conn, &event).await {
                delivered += 1;
            } else {
                tracing::debug!(doctor = %doctor_id, conn_id = conn, "Emergency push lost");
            }
        }
        self.stats.add_emergency_notifications(delivered);
    }

    /// Remove a connection from every registry
    ///
    /// The only cancellation primitive: immediate and unconditional, no grace
    /// period. After this returns, no relay or broadcast can reach the
    /// connection.
    pub async fn disconnect(&self, conn: ConnId) {
        self.peers.remove(conn).await;
        self.rooms.remove_connection(conn).await;
        self.chat.remove_connection(conn).await;
        self.directory.remove_connection(conn).await;

        tracing::debug!(conn_id = conn, "Connection cleaned up");
    }

    /// Forward an opaque negotiation payload to the other members of a room
    async fn relay_signal<F>(
        &self,
        room_id: &str,
        sender: ConnId,
        wrap: F,
        payload: serde_json::Value,
    ) where
        F: Fn(serde_json::Value) -> ServerEvent,
    {
        let targets = self.rooms.relay_targets(room_id, sender).await;

        if targets.is_empty() {
            tracing::debug!(room = %room_id, conn_id = sender, "No peer present, message dropped");
            return;
        }

        let mut delivered = 0u64;
        for target in targets {
            if self.send_event(target, &wrap(payload.clone())).await {
                delivered += 1;
            }
        }
        self.stats.add_signals_relayed(delivered);
    }

    /// Serialize an event and queue it for a connection
    async fn send_event<E: Serialize>(&self, conn: ConnId, event: &E) -> bool {
        match serde_json::to_string(event) {
            Ok(json) => self.peers.send(conn, Message::Text(json)).await,
            Err(e) => {
                tracing::error!(conn_id = conn, error = %e, "Failed to serialize event");
                false
            }
        }
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}
