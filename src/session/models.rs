use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Opaque identity of one WebSocket connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One card of the estimate deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Estimate {
    Points(u8),
    Unknown,
}

/// The full deck, in display order
pub const ESTIMATE_SET: [Estimate; 10] = [
    Estimate::Points(1),
    Estimate::Points(2),
    Estimate::Points(3),
    Estimate::Points(5),
    Estimate::Points(8),
    Estimate::Points(13),
    Estimate::Points(21),
    Estimate::Points(40),
    Estimate::Points(100),
    Estimate::Unknown,
];

const UNKNOWN_WIRE: &str = "?";

impl Estimate {
    /// Parse a raw JSON value, returning None for anything outside the deck
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let candidate = match value {
            serde_json::Value::Number(n) => {
                let points = n.as_u64()?;
                Estimate::Points(u8::try_from(points).ok()?)
            }
            serde_json::Value::String(s) if s == UNKNOWN_WIRE || s == "unknown" => {
                Estimate::Unknown
            }
            _ => return None,
        };

        ESTIMATE_SET.contains(&candidate).then_some(candidate)
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::Points(points) => write!(f, "{}", points),
            Estimate::Unknown => f.write_str(UNKNOWN_WIRE),
        }
    }
}

impl Serialize for Estimate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Estimate::Points(points) => serializer.serialize_u8(*points),
            Estimate::Unknown => serializer.serialize_str(UNKNOWN_WIRE),
        }
    }
}

impl<'de> Deserialize<'de> for Estimate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Estimate::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("not an estimate: {}", value)))
    }
}

/// A connected voter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ConnectionId,
    pub name: String,
    pub vote: Option<Estimate>,
    pub is_admin: bool,
}

impl Participant {
    pub fn new(id: ConnectionId, name: String, is_admin: bool) -> Self {
        Self {
            id,
            name,
            vote: None,
            is_admin,
        }
    }

    pub fn has_voted(&self) -> bool {
        self.vote.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Voting,
    Revealed,
}

/// Voting lifecycle state; `deadline` is only set while voting
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoundState {
    pub phase: Phase,
    pub deadline: Option<DateTime<Utc>>,
    /// Incremented every time a round starts
    pub round: u64,
}

/// Everything a freshly connected client needs to render the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub players: Vec<Participant>,
    pub phase: Phase,
    pub deadline: Option<DateTime<Utc>>,
}
