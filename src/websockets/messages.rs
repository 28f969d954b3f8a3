use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{ConnectionId, Participant, Phase, SessionSnapshot};

/// Message types for WebSocket communication
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    // Client -> Server
    SetName,
    StartVoting,
    Vote,
    Reset,

    // Server -> Client
    State,
    PlayersUpdate,
    VotingStarted,
    Reveal,
    VotingReset,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
    pub player_uuid: Option<String>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default)]
    pub meta: Option<WebSocketMessageMeta>,
}

/// Client-to-Server message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetNamePayload {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotePayload {
    /// Kept raw so values outside the deck can be logged and dropped
    pub value: serde_json::Value,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatePayload {
    /// Identity of the receiving connection
    pub connection_id: ConnectionId,
    pub players: Vec<Participant>,
    pub phase: Phase,
    pub deadline: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayersUpdatePayload {
    pub players: Vec<Participant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingStartedPayload {
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealPayload {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotingResetPayload {}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: serde_json::Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
                player_uuid: None,
            }),
        }
    }

    fn with_payload<T: Serialize>(
        message_type: MessageType,
        payload: T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(message_type, serde_json::to_value(payload)?))
    }

    /// Create a STATE message for a newly connected client
    pub fn state(
        connection_id: ConnectionId,
        snapshot: SessionSnapshot,
    ) -> Result<Self, serde_json::Error> {
        let payload = StatePayload {
            connection_id,
            players: snapshot.players,
            phase: snapshot.phase,
            deadline: snapshot.deadline,
        };
        Self::with_payload(MessageType::State, payload)
    }

    /// Create a PLAYERS_UPDATE message
    pub fn players_update(players: Vec<Participant>) -> Result<Self, serde_json::Error> {
        Self::with_payload(MessageType::PlayersUpdate, PlayersUpdatePayload { players })
    }

    /// Create a VOTING_STARTED message
    pub fn voting_started(deadline: DateTime<Utc>) -> Result<Self, serde_json::Error> {
        Self::with_payload(MessageType::VotingStarted, VotingStartedPayload { deadline })
    }

    /// Create a REVEAL message
    pub fn reveal() -> Result<Self, serde_json::Error> {
        Self::with_payload(MessageType::Reveal, RevealPayload {})
    }

    /// Create a VOTING_RESET message
    pub fn voting_reset() -> Result<Self, serde_json::Error> {
        Self::with_payload(MessageType::VotingReset, VotingResetPayload {})
    }

    /// Create a SET_NAME message
    pub fn set_name(name: String) -> Result<Self, serde_json::Error> {
        Self::with_payload(MessageType::SetName, SetNamePayload { name })
    }

    /// Create a VOTE message
    pub fn vote(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Self::with_payload(MessageType::Vote, VotePayload { value })
    }
}
