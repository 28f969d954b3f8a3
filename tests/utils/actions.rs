use serde_json::{json, Value};

use planning_poker::{ConnectionId, MessageHandler, MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a raw frame through the inbound handler
    pub async fn send_raw(&self, id: ConnectionId, frame: &str) {
        self.input_handler
            .handle_message(id, frame.to_string())
            .await;
    }

    /// Send a WebSocket message through the inbound handler
    pub async fn send_message(&self, id: ConnectionId, message: WebSocketMessage) {
        let message_json = serde_json::to_string(&message).unwrap();
        self.send_raw(id, &message_json).await;
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn send_set_name(&self, id: ConnectionId, name: &str) {
        self.send_message(id, WebSocketMessage::set_name(name.to_string()).unwrap())
            .await;
    }

    pub async fn send_start_voting(&self, player: &str) {
        self.send_message(
            self.id(player),
            WebSocketMessage::new(MessageType::StartVoting, json!({})),
        )
        .await;
    }

    pub async fn send_vote(&self, player: &str, value: Value) {
        self.send_message(self.id(player), WebSocketMessage::vote(value).unwrap())
            .await;
    }

    pub async fn send_reset(&self, player: &str) {
        self.send_message(
            self.id(player),
            WebSocketMessage::new(MessageType::Reset, json!({})),
        )
        .await;
    }

    pub async fn disconnect(&self, player: &str) {
        self.gateway.disconnect(self.id(player)).await;
    }
}
