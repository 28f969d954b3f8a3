use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info};

use super::events::SessionEvent;
use super::models::{ConnectionId, Estimate, Phase, RoundState, ESTIMATE_SET};
use super::store::SessionStore;
use crate::shared::AppError;

/// How long a round stays open before votes are revealed anyway
pub const VOTING_WINDOW: Duration = Duration::from_secs(60);

/// Voting state machine: Idle -> Voting -> Revealed, and back to Idle on reset
///
/// Every operation either mutates the store and returns the events to
/// broadcast, or returns an error and leaves the store untouched.
pub struct RoundController;

impl RoundController {
    /// Open a new round. Admin only, and not while a round is already open.
    pub fn start_voting(
        store: &mut SessionStore,
        requester: ConnectionId,
        now: DateTime<Utc>,
    ) -> Result<Vec<SessionEvent>, AppError> {
        require_admin(store, requester)?;

        let current = store.round().clone();
        if current.phase == Phase::Voting {
            return Err(AppError::InvalidInput(
                "voting is already in progress".to_string(),
            ));
        }

        let window = chrono::Duration::from_std(VOTING_WINDOW)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let deadline = now + window;
        let round = current.round + 1;

        clear_votes(store);
        store.set_round(RoundState {
            phase: Phase::Voting,
            deadline: Some(deadline),
            round,
        });

        info!(round, deadline = %deadline, "Voting started");

        Ok(vec![
            SessionEvent::PlayersUpdated,
            SessionEvent::VotingStarted { deadline, round },
        ])
    }

    /// Record a vote, revealing early once everyone has voted
    pub fn submit_vote(
        store: &mut SessionStore,
        id: ConnectionId,
        estimate: Estimate,
    ) -> Result<Vec<SessionEvent>, AppError> {
        if store.round().phase != Phase::Voting {
            return Err(AppError::InvalidInput("no round in progress".to_string()));
        }
        if !ESTIMATE_SET.contains(&estimate) {
            return Err(AppError::InvalidInput(format!(
                "{} is not a valid estimate",
                estimate
            )));
        }

        let participant = store
            .get_mut(&id)
            .ok_or(AppError::UnknownParticipant(id))?;
        participant.vote = Some(estimate);
        debug!(connection_id = %id, "Vote recorded");

        let mut events = vec![SessionEvent::PlayersUpdated];
        events.extend(Self::evaluate_reveal(store));
        Ok(events)
    }

    /// Reveal if a round is open and every participant of a non-empty roster
    /// has voted. Also run after departures, since a smaller roster can
    /// complete a round.
    pub fn evaluate_reveal(store: &mut SessionStore) -> Option<SessionEvent> {
        if store.round().phase != Phase::Voting || store.is_empty() {
            return None;
        }
        if !store.participants().all(|p| p.has_voted()) {
            return None;
        }

        let round = store.round().round;
        info!(round, voters = store.len(), "All participants voted");
        Some(reveal(store))
    }

    /// Timer expiry for `round`. A no-op unless that round is still open.
    pub fn deadline_elapsed(store: &mut SessionStore, round: u64) -> Vec<SessionEvent> {
        let current = store.round();
        if current.phase != Phase::Voting || current.round != round {
            debug!(
                round,
                current_round = current.round,
                phase = %current.phase,
                "Ignoring deadline for a closed round"
            );
            return vec![];
        }

        let voted = store.participants().filter(|p| p.has_voted()).count();
        info!(round, voted, total = store.len(), "Voting deadline elapsed");
        vec![reveal(store)]
    }

    /// Clear every vote and return to Idle. Admin only.
    pub fn reset(
        store: &mut SessionStore,
        requester: ConnectionId,
    ) -> Result<Vec<SessionEvent>, AppError> {
        require_admin(store, requester)?;

        let round = store.round().round;
        clear_votes(store);
        store.set_round(RoundState {
            phase: Phase::Idle,
            deadline: None,
            round,
        });

        info!(round, "Voting reset");

        Ok(vec![SessionEvent::PlayersUpdated, SessionEvent::VotingReset])
    }
}

fn require_admin(store: &SessionStore, requester: ConnectionId) -> Result<(), AppError> {
    let participant = store
        .get(&requester)
        .ok_or(AppError::UnknownParticipant(requester))?;
    if !participant.is_admin {
        return Err(AppError::AuthorizationDenied(requester));
    }
    Ok(())
}

fn clear_votes(store: &mut SessionStore) {
    for participant in store.participants_mut() {
        participant.vote = None;
    }
}

fn reveal(store: &mut SessionStore) -> SessionEvent {
    let round = store.round().round;
    store.set_round(RoundState {
        phase: Phase::Revealed,
        deadline: None,
        round,
    });
    SessionEvent::Revealed { round }
}
