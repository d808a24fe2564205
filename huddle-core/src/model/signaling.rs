use crate::model::connection::ConnectionId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Frames that could not be turned into a known message.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed signaling message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Messages a client sends to the signaling server.
///
/// Encoded as `{"event": "<kebab-case name>", "data": <payload>}`.
/// `room_id` on relayed payloads is accepted for compatibility and never used
/// for routing; the server only trusts the room the sender actually joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    JoinRoom(RoomId),
    LeaveRoom,
    Offer {
        offer: Value,
        to: ConnectionId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_id: Option<RoomId>,
    },
    Answer {
        answer: Value,
        to: ConnectionId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_id: Option<RoomId>,
    },
    IceCandidate {
        candidate: Value,
        to: ConnectionId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_id: Option<RoomId>,
    },
    ChatMessage {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_id: Option<RoomId>,
    },
}

impl ClientMessage {
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Wire event name, for logs.
    pub fn event(&self) -> &'static str {
        match self {
            ClientMessage::JoinRoom(_) => "join-room",
            ClientMessage::LeaveRoom => "leave-room",
            ClientMessage::Offer { .. } => "offer",
            ClientMessage::Answer { .. } => "answer",
            ClientMessage::IceCandidate { .. } => "ice-candidate",
            ClientMessage::ChatMessage { .. } => "chat-message",
        }
    }
}

/// Messages the signaling server sends to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerMessage {
    /// First message on every connection: the id the server assigned to it.
    Welcome { id: ConnectionId },
    /// Members already in the room, oldest first. Sent only to the joiner.
    ExistingUsers(Vec<ConnectionId>),
    UserConnected(ConnectionId),
    Offer { offer: Value, from: ConnectionId },
    Answer { answer: Value, from: ConnectionId },
    IceCandidate { candidate: Value, from: ConnectionId },
    ChatMessage { text: String, sender_id: ConnectionId },
    UserDisconnected(ConnectionId),
}

impl ServerMessage {
    pub fn from_json(text: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
