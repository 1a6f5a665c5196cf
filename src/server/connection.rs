//! Per-connection handling
//!
//! Each accepted socket is upgraded to a WebSocket, routed to a namespace by
//! its URL path, and split into a writer task (draining the connection's
//! mailbox, FIFO) and a read loop (parsing and dispatching events). The read
//! loop ending — close frame, transport error, or EOF — triggers the
//! disconnect sweep across every registry.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{Request, Response};
use tokio_tungstenite::tungstenite::Message;

use crate::error::Result;
use crate::protocol::chat::ChatClientEvent;
use crate::protocol::event::ClientEvent;
use crate::ConnId;

use super::relay::Relay;

/// Logical endpoint a connection is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// Default namespace: WebRTC signaling, doctor presence, emergency
    Signal,
    /// Chat rooms
    Chat,
}

impl Namespace {
    /// Route a request path to a namespace
    ///
    /// Anything that is not `/chat` lands on the default namespace; room ids,
    /// not paths, partition traffic there.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        if trimmed == "/chat" {
            Namespace::Chat
        } else {
            Namespace::Signal
        }
    }
}

/// Run a connection to completion: handshake, read loop, disconnect sweep
pub(crate) async fn run(
    conn_id: ConnId,
    socket: TcpStream,
    peer_addr: SocketAddr,
    relay: Arc<Relay>,
) -> Result<()> {
    let mut path = String::from("/");
    let ws = accept_hdr_async(socket, |req: &Request, resp: Response| {
        path = req.uri().path().to_string();
        Ok(resp)
    })
    .await?;

    let namespace = Namespace::from_path(&path);

    tracing::info!(
        conn_id = conn_id,
        peer = %peer_addr,
        namespace = ?namespace,
        "WebSocket connected"
    );

    let (mut sink, mut stream) = ws.split();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    relay.peers().insert(conn_id, tx).await;

    // Single writer per connection keeps delivery FIFO. The task ends when
    // the disconnect sweep drops the sender out of the peer map.
    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
        let _ = sink.close().await;
    });

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => dispatch(&relay, namespace, conn_id, &text).await,
            Ok(Message::Close(_)) => break,
            // Ping/pong are answered by the transport; binary frames have no
            // meaning in this protocol
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = conn_id, error = %e, "Connection error");
                break;
            }
        }
    }

    relay.disconnect(conn_id).await;
    let _ = writer.await;

    Ok(())
}

/// Parse and dispatch one inbound text frame
///
/// Unparseable frames are dropped with a debug log; they never terminate the
/// connection.
async fn dispatch(relay: &Relay, namespace: Namespace, conn_id: ConnId, text: &str) {
    match namespace {
        Namespace::Signal => match serde_json::from_str::<ClientEvent>(text) {
            Ok(event) => relay.handle_signal(conn_id, event).await,
            Err(e) => {
                tracing::debug!(conn_id = conn_id, error = %e, "Dropped malformed event");
            }
        },
        Namespace::Chat => match serde_json::from_str::<ChatClientEvent>(text) {
            Ok(event) => relay.handle_chat(conn_id, event).await,
            Err(e) => {
                tracing::debug!(conn_id = conn_id, error = %e, "Dropped malformed chat event");
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_routing() {
        assert_eq!(Namespace::from_path("/"), Namespace::Signal);
        assert_eq!(Namespace::from_path(""), Namespace::Signal);
        assert_eq!(Namespace::from_path("/chat"), Namespace::Chat);
        assert_eq!(Namespace::from_path("/chat/"), Namespace::Chat);
        assert_eq!(Namespace::from_path("/video"), Namespace::Signal);
    }

    #[tokio::test]
    async fn test_malformed_frame_is_dropped_without_side_effects() {
        let relay = Relay::new();

        dispatch(&relay, Namespace::Signal, 1, "not json").await;
        dispatch(&relay, Namespace::Chat, 1, r#"{"event":"unknown"}"#).await;

        assert_eq!(relay.rooms().room_count().await, 0);
        assert_eq!(relay.chat_rooms().room_count().await, 0);
    }
}
