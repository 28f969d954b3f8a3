use super::models::{ConnectionId, Participant, RoundState, SessionSnapshot};

/// In-memory storage for the single room: roster plus round state
///
/// Holds no rules of its own. Callers validate and broadcast.
#[derive(Debug, Default)]
pub struct SessionStore {
    participants: Vec<Participant>, // join order
    round: RoundState,
    sequence: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a participant, replacing any existing entry with the same id
    pub fn upsert(&mut self, participant: Participant) {
        match self.get_mut(&participant.id) {
            Some(existing) => *existing = participant,
            None => self.participants.push(participant),
        }
    }

    pub fn remove(&mut self, id: &ConnectionId) -> Option<Participant> {
        let index = self.participants.iter().position(|p| &p.id == id)?;
        Some(self.participants.remove(index))
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn get_mut(&mut self, id: &ConnectionId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Full copy of the roster in join order
    pub fn roster(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn participants_mut(&mut self) -> impl Iterator<Item = &mut Participant> {
        self.participants.iter_mut()
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn set_round(&mut self, round: RoundState) {
        self.round = round;
    }

    /// Next value of the counter used for generated names, starting at 1
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            players: self.roster(),
            phase: self.round.phase,
            deadline: self.round.deadline,
        }
    }
}
