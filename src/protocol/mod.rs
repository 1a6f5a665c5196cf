//! Wire protocol for the two signaling namespaces
//!
//! Events are JSON text frames tagged adjacently:
//!
//! ```text
//! {"event": "join-room", "data": {"roomId": "r1"}}
//! ```
//!
//! The default namespace (`/`) carries WebRTC negotiation and emergency
//! events; the `/chat` namespace carries chat-room events. SDP and ICE
//! payloads are opaque [`serde_json::Value`]s relayed verbatim — the server
//! never inspects or validates them.

pub mod chat;
pub mod event;

pub use chat::{ChatClientEvent, ChatServerEvent};
pub use event::{ClientEvent, ServerEvent, EMERGENCY_ROOM_ID};
