use chrono::{DateTime, Utc};

use super::models::Estimate;

/// What a client asked for
#[derive(Debug, Clone, PartialEq)]
pub enum ClientIntent {
    SetName(String),
    StartVoting,
    Vote(Estimate),
    Reset,
}

/// Facts about accepted session mutations
///
/// Produced by the lifecycle and round controllers, consumed by the gateway
/// which turns each one into an outbound broadcast.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The roster changed (membership, names or votes)
    PlayersUpdated,

    /// A round started; votes are closed at `deadline`
    VotingStarted {
        deadline: DateTime<Utc>,
        round: u64,
    },

    /// Votes are now visible
    Revealed { round: u64 },

    /// The admin cleared the round
    VotingReset,
}

impl SessionEvent {
    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            SessionEvent::PlayersUpdated => "players_updated",
            SessionEvent::VotingStarted { .. } => "voting_started",
            SessionEvent::Revealed { .. } => "revealed",
            SessionEvent::VotingReset => "voting_reset",
        }
    }
}
