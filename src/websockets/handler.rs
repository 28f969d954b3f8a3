use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::session::{ClientIntent, ConnectionId, Estimate};
use crate::shared::AppState;
use crate::websockets::gateway::BroadcastGateway;
use crate::websockets::messages::{MessageType, SetNamePayload, VotePayload, WebSocketMessage};

use super::socket::{Connection, MessageHandler};

/// Message handler for receiving WebSocket messages from the client
pub struct WebsocketReceiveHandler {
    gateway: Arc<BroadcastGateway>,
}

impl WebsocketReceiveHandler {
    pub fn new(gateway: Arc<BroadcastGateway>) -> Self {
        Self { gateway }
    }
}

/// Turn a parsed envelope into a request, or None if it carries nothing we act on
pub fn parse_intent(message: WebSocketMessage) -> Option<ClientIntent> {
    match message.message_type {
        MessageType::SetName => {
            // A bare string payload is accepted as the name too
            let name = match message.payload {
                serde_json::Value::String(name) => name,
                payload => serde_json::from_value::<SetNamePayload>(payload)
                    .ok()
                    .map(|p| p.name)
                    .unwrap_or_default(),
            };
            Some(ClientIntent::SetName(name))
        }
        MessageType::StartVoting => Some(ClientIntent::StartVoting),
        MessageType::Vote => {
            let payload = serde_json::from_value::<VotePayload>(message.payload).ok()?;
            match Estimate::from_value(&payload.value) {
                Some(estimate) => Some(ClientIntent::Vote(estimate)),
                None => {
                    debug!(value = %payload.value, "Vote outside the estimate set");
                    None
                }
            }
        }
        MessageType::Reset => Some(ClientIntent::Reset),
        other => {
            debug!(message_type = ?other, "Unhandled message type");
            None
        }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, connection_id: ConnectionId, message: String) {
        debug!(
            connection_id = %connection_id,
            message = %message,
            "Received message"
        );

        match serde_json::from_str::<WebSocketMessage>(&message) {
            Ok(ws_message) => {
                if let Some(intent) = parse_intent(ws_message) {
                    self.gateway.handle_intent(connection_id, intent).await;
                }
            }
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to parse WebSocket message"
                );
            }
        }
    }
}

/// WebSocket endpoint. Every socket is a participant; there is no auth.
/// GET /ws
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    info!("WebSocket connection requested");
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    let connection_id = ConnectionId::new();
    let gateway = Arc::clone(&app_state.gateway);

    info!(connection_id = %connection_id, "WebSocket connection established");

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    gateway.connect(connection_id, outbound_sender).await;

    let message_handler = Arc::new(WebsocketReceiveHandler::new(Arc::clone(&gateway)));
    let connection = Connection::new(
        connection_id,
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "WebSocket connection closed cleanly");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = ?e,
                "WebSocket connection error"
            );
        }
    }

    gateway.disconnect(connection_id).await;
}
