//! Default-namespace events: WebRTC negotiation and emergency fan-out

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Room identifier attached to every emergency notification
pub const EMERGENCY_ROOM_ID: &str = "emergency";

/// Events received from clients on the default namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Join (or create) a signaling room
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String },

    /// SDP offer for the other peer in the room
    #[serde(rename_all = "camelCase")]
    Offer { room_id: String, offer: Value },

    /// SDP answer for the other peer in the room
    #[serde(rename_all = "camelCase")]
    Answer { room_id: String, answer: Value },

    /// ICE candidate for the other peer in the room
    #[serde(rename_all = "camelCase")]
    IceCandidate { room_id: String, candidate: Value },

    /// Register this connection as a doctor's live connection
    #[serde(rename = "doctorConnect", rename_all = "camelCase")]
    DoctorConnect { doctor_id: String },

    /// Patient-initiated emergency; fans out to every registered doctor
    ///
    /// Clients send additional fields alongside `name`; they are ignored here.
    #[serde(rename = "emergencyRequest")]
    EmergencyRequest { name: String },
}

/// Events sent to clients on the default namespace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// The room reached two peers; negotiation may begin
    Ready,

    /// Join rejected: the room already holds two peers
    RoomFull,

    /// Relayed SDP offer from the other peer
    Offer(Value),

    /// Relayed SDP answer from the other peer
    Answer(Value),

    /// Relayed ICE candidate from the other peer
    IceCandidate(Value),

    /// Emergency notification pushed to a registered doctor
    #[serde(rename = "emergencyNotification", rename_all = "camelCase")]
    EmergencyNotification {
        patient_name: String,
        room_id: String,
    },
}

impl ServerEvent {
    /// Build an emergency notification for the given patient
    pub fn emergency(patient_name: impl Into<String>) -> Self {
        ServerEvent::EmergencyNotification {
            patient_name: patient_name.into(),
            room_id: EMERGENCY_ROOM_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_room_wire_format() {
        let json = r#"{"event":"join-room","data":{"roomId":"r1"}}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        match event {
            ClientEvent::JoinRoom { room_id } => assert_eq!(room_id, "r1"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_offer_payload_is_opaque() {
        let json = r#"{"event":"offer","data":{"roomId":"r1","offer":{"type":"offer","sdp":"v=0..."}}}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        match event {
            ClientEvent::Offer { room_id, offer } => {
                assert_eq!(room_id, "r1");
                assert_eq!(offer["type"], "offer");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_emergency_request_ignores_extra_fields() {
        let json = r#"{"event":"emergencyRequest","data":{"name":"John","location":"ward 3"}}"#;
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        match event {
            ClientEvent::EmergencyRequest { name } => assert_eq!(name, "John"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_ready_serializes_without_data() {
        let json = serde_json::to_string(&ServerEvent::Ready).unwrap();
        assert_eq!(json, r#"{"event":"ready"}"#);
    }

    #[test]
    fn test_room_full_wire_format() {
        let json = serde_json::to_string(&ServerEvent::RoomFull).unwrap();
        assert_eq!(json, r#"{"event":"room-full"}"#);
    }

    #[test]
    fn test_relayed_offer_is_verbatim() {
        let payload = serde_json::json!({"type": "offer", "sdp": "v=0..."});
        let json = serde_json::to_string(&ServerEvent::Offer(payload.clone())).unwrap();
        let expected = format!(
            r#"{{"event":"offer","data":{}}}"#,
            serde_json::to_string(&payload).unwrap()
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn test_emergency_notification_wire_format() {
        let json = serde_json::to_string(&ServerEvent::emergency("John")).unwrap();
        assert_eq!(
            json,
            r#"{"event":"emergencyNotification","data":{"patientName":"John","roomId":"emergency"}}"#
        );
    }
}
