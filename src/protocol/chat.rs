//! Chat-namespace events
//!
//! The `/chat` namespace is independent of the default namespace: a room id
//! can exist in both without collision. Messages are broadcast to every
//! member of the room, including the sender — clients rely on the echo to
//! render their own message.

use serde::{Deserialize, Serialize};

use crate::ConnId;

/// Events received from clients on the `/chat` namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ChatClientEvent {
    /// Join (or create) a chat room
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String },

    /// Text message for the room
    #[serde(rename_all = "camelCase")]
    UserMessage { room_id: String, text: String },
}

/// Events sent to clients on the `/chat` namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ChatServerEvent {
    /// Join rejected: the room already holds two peers
    RoomFull,

    /// Chat message broadcast to the room (sender included)
    Message { text: String, sender: ConnId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_wire_format() {
        let json = r#"{"event":"user-message","data":{"roomId":"c1","text":"hello"}}"#;
        let event: ChatClientEvent = serde_json::from_str(json).unwrap();

        match event {
            ChatClientEvent::UserMessage { room_id, text } => {
                assert_eq!(room_id, "c1");
                assert_eq!(text, "hello");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_message_carries_sender() {
        let event = ChatServerEvent::Message {
            text: "hello".to_string(),
            sender: 7,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"message","data":{"text":"hello","sender":7}}"#);
    }
}
