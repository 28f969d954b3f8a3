use axum::{extract::State, Json};
use tracing::{info, instrument};

use super::models::SessionSnapshot;
use crate::shared::AppState;

/// HTTP handler for reading the room without joining it
///
/// GET /session
/// Returns the same roster, phase and deadline a new socket receives
#[instrument(name = "get_session", skip(state))]
pub async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    let snapshot = state.gateway.snapshot().await;

    info!(
        players = snapshot.players.len(),
        phase = %snapshot.phase,
        "Session snapshot served"
    );

    Json(snapshot)
}
