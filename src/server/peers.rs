//! Live peer table
//!
//! Maps each connection to the sender half of its outbound mailbox. Every
//! frame for a connection goes through its mailbox and is drained by a single
//! writer task, so delivery to a given peer is FIFO; there is no ordering
//! guarantee across peers.

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};
use tokio_tungstenite::tungstenite::Message;

use crate::ConnId;

/// Sender half of a connection's outbound mailbox
pub type PeerSender = mpsc::UnboundedSender<Message>;

/// Table of live connections and their outbound mailboxes
pub struct PeerMap {
    peers: RwLock<HashMap<ConnId, PeerSender>>,
}

impl PeerMap {
    /// Create an empty peer table
    pub fn new() -> Self {
        Self {
            peers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection's outbound sender
    pub async fn insert(&self, conn: ConnId, sender: PeerSender) {
        self.peers.write().await.insert(conn, sender);
    }

    /// Remove a connection; its mailbox closes once the sender drops
    pub async fn remove(&self, conn: ConnId) -> bool {
        self.peers.write().await.remove(&conn).is_some()
    }

    /// Queue a frame for a connection
    ///
    /// Best-effort: returns `false` if the connection is gone or its mailbox
    /// is closed. Lost frames are not retried.
    pub async fn send(&self, conn: ConnId, message: Message) -> bool {
        let peers = self.peers.read().await;

        match peers.get(&conn) {
            Some(sender) => sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Whether a connection is live
    pub async fn contains(&self, conn: ConnId) -> bool {
        self.peers.read().await.contains_key(&conn)
    }

    /// Number of live connections
    pub async fn len(&self) -> usize {
        self.peers.read().await.len()
    }

    /// Whether no connections are live
    pub async fn is_empty(&self) -> bool {
        self.peers.read().await.is_empty()
    }
}

impl Default for PeerMap {
    fn default() -> Self {
        Self::new()
    }
}
