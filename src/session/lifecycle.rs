use tracing::{debug, info};

use super::events::SessionEvent;
use super::models::{ConnectionId, Participant};
use super::store::SessionStore;
use crate::shared::AppError;

/// Binds connections to roster entries: join, rename and leave
pub struct ConnectionLifecycle;

impl ConnectionLifecycle {
    /// Add a participant for a new connection
    ///
    /// The first participant to join an empty roster becomes admin. Joining
    /// twice with the same id changes nothing.
    pub fn join(store: &mut SessionStore, id: ConnectionId) -> Vec<SessionEvent> {
        if store.contains(&id) {
            debug!(connection_id = %id, "Participant already joined");
            return vec![];
        }

        let is_admin = store.is_empty();
        let name = default_name(store);
        info!(connection_id = %id, name = %name, is_admin, "Participant joined");

        store.upsert(Participant::new(id, name, is_admin));
        vec![SessionEvent::PlayersUpdated]
    }

    /// Set a display name; blank input falls back to a generated one
    pub fn rename(store: &mut SessionStore, id: ConnectionId, proposed: &str) -> Vec<SessionEvent> {
        let mut events = Self::join(store, id);

        let trimmed = proposed.trim();
        let name = if trimmed.is_empty() {
            default_name(store)
        } else {
            trimmed.to_string()
        };

        if let Some(participant) = store.get_mut(&id) {
            debug!(connection_id = %id, name = %name, "Participant renamed");
            participant.name = name;
        }

        if events.is_empty() {
            events.push(SessionEvent::PlayersUpdated);
        }
        events
    }

    /// Drop a participant and whatever vote they had cast
    pub fn leave(
        store: &mut SessionStore,
        id: ConnectionId,
    ) -> Result<Vec<SessionEvent>, AppError> {
        let participant = store
            .remove(&id)
            .ok_or(AppError::UnknownParticipant(id))?;

        info!(
            connection_id = %id,
            name = %participant.name,
            was_admin = participant.is_admin,
            remaining = store.len(),
            "Participant left"
        );

        Ok(vec![SessionEvent::PlayersUpdated])
    }
}

fn default_name(store: &mut SessionStore) -> String {
    format!("Player {}", store.next_sequence())
}
