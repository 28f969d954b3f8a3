use chrono::Utc;
use std::sync::{Arc, Weak};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::session::{
    ClientIntent, ConnectionId, ConnectionLifecycle, DeadlineTimer, RoundController,
    SessionEvent, SessionSnapshot, SessionStore, VOTING_WINDOW,
};
use crate::shared::AppError;
use crate::websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage};

/// The room's mutable state: roster, round, and the pending reveal timer
struct Session {
    store: SessionStore,
    timer: DeadlineTimer,
}

/// Single entry point for everything that changes the session
///
/// Every inbound request takes the session lock, runs to completion and
/// enqueues its broadcasts before the next one is looked at, so clients see
/// messages in the same order the transitions happened.
pub struct BroadcastGateway {
    session: Mutex<Session>,
    connection_manager: Arc<dyn ConnectionManager>,
    this: Weak<BroadcastGateway>,
}

impl BroadcastGateway {
    pub fn new(connection_manager: Arc<dyn ConnectionManager>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            session: Mutex::new(Session {
                store: SessionStore::new(),
                timer: DeadlineTimer::new(),
            }),
            connection_manager,
            this: this.clone(),
        })
    }

    /// Register a new socket: send it the current state, then add it to the
    /// roster and tell everyone
    pub async fn connect(&self, id: ConnectionId, sender: mpsc::UnboundedSender<String>) {
        let mut session = self.session.lock().await;

        self.connection_manager.add_connection(id, sender).await;

        match WebSocketMessage::state(id, session.store.snapshot())
            .and_then(|message| serde_json::to_string(&message))
        {
            Ok(json) => self.connection_manager.send_to_connection(&id, &json).await,
            Err(e) => warn!(connection_id = %id, error = %e, "Failed to serialize state"),
        }

        let events = ConnectionLifecycle::join(&mut session.store, id);
        self.dispatch(&mut session, events).await;
    }

    /// Apply one client request. Rejected requests change nothing and are
    /// not answered.
    pub async fn handle_intent(&self, id: ConnectionId, intent: ClientIntent) {
        let mut session = self.session.lock().await;

        let result = match intent {
            ClientIntent::SetName(name) => {
                Ok(ConnectionLifecycle::rename(&mut session.store, id, &name))
            }
            ClientIntent::StartVoting => {
                RoundController::start_voting(&mut session.store, id, Utc::now())
            }
            ClientIntent::Vote(estimate) => {
                RoundController::submit_vote(&mut session.store, id, estimate)
            }
            ClientIntent::Reset => RoundController::reset(&mut session.store, id),
        };

        match result {
            Ok(events) => self.dispatch(&mut session, events).await,
            Err(e) => ignore_rejected(id, &e),
        }
    }

    /// Drop a closed socket and its participant; may complete the round
    pub async fn disconnect(&self, id: ConnectionId) {
        let mut session = self.session.lock().await;

        self.connection_manager.remove_connection(&id).await;

        match ConnectionLifecycle::leave(&mut session.store, id) {
            Ok(mut events) => {
                events.extend(RoundController::evaluate_reveal(&mut session.store));
                self.dispatch(&mut session, events).await;
            }
            Err(e) => ignore_rejected(id, &e),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.store.snapshot()
    }

    /// Round whose reveal timer is currently pending, if any
    pub async fn armed_round(&self) -> Option<u64> {
        self.session.lock().await.timer.armed_round()
    }

    async fn fire_deadline(&self, round: u64) {
        let mut session = self.session.lock().await;
        session.timer.detach(round);

        let events = RoundController::deadline_elapsed(&mut session.store, round);
        self.dispatch(&mut session, events).await;
    }

    async fn dispatch(&self, session: &mut Session, events: Vec<SessionEvent>) {
        for message in self.apply(session, &events) {
            self.connection_manager.broadcast(&message).await;
        }
    }

    /// Update the timer for each event and render the outbound messages
    fn apply(&self, session: &mut Session, events: &[SessionEvent]) -> Vec<String> {
        let mut outbound = Vec::with_capacity(events.len());

        for event in events {
            debug!(event = event.event_type(), "Publishing session event");

            let message = match event {
                SessionEvent::PlayersUpdated => {
                    WebSocketMessage::players_update(session.store.roster())
                }
                SessionEvent::VotingStarted { deadline, round } => {
                    self.arm_deadline(&mut session.timer, *round);
                    WebSocketMessage::voting_started(*deadline)
                }
                SessionEvent::Revealed { round } => {
                    session.timer.cancel();
                    info!(round, "Votes revealed");
                    WebSocketMessage::reveal()
                }
                SessionEvent::VotingReset => {
                    session.timer.cancel();
                    WebSocketMessage::voting_reset()
                }
            };

            match message.and_then(|message| serde_json::to_string(&message)) {
                Ok(json) => outbound.push(json),
                Err(e) => warn!(
                    event = event.event_type(),
                    error = %AppError::Internal(e.to_string()),
                    "Dropping unserializable message"
                ),
            }
        }

        outbound
    }

    fn arm_deadline(&self, timer: &mut DeadlineTimer, round: u64) {
        let gateway = self.this.clone();
        timer.arm(round, async move {
            tokio::time::sleep(VOTING_WINDOW).await;
            if let Some(gateway) = gateway.upgrade() {
                gateway.fire_deadline(round).await;
            }
        });
    }
}

fn ignore_rejected(id: ConnectionId, error: &AppError) {
    debug!(connection_id = %id, error = %error, "Ignoring rejected request");
}
