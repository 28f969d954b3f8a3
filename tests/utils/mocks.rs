use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use planning_poker::{ConnectionId, ConnectionManager};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records every message per connection instead of writing to sockets
#[derive(Clone)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<ConnectionId, VecDeque<String>>>>,
    connected: Arc<RwLock<Vec<ConnectionId>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(RwLock::new(HashMap::new())),
            connected: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn get_messages_for(&self, id: &ConnectionId) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(id)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Pop the oldest unread message for a connection
    pub async fn consume_message_for(&self, id: &ConnectionId) -> Option<String> {
        self.sent_messages
            .write()
            .await
            .get_mut(id)
            .and_then(|queue| queue.pop_front())
    }

    pub async fn is_connected(&self, id: &ConnectionId) -> bool {
        self.connected.read().await.contains(id)
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, id: ConnectionId, _sender: mpsc::UnboundedSender<String>) {
        self.connected.write().await.push(id);
    }

    async fn remove_connection(&self, id: &ConnectionId) {
        self.connected.write().await.retain(|c| c != id);
    }

    async fn send_to_connection(&self, id: &ConnectionId, message: &str) {
        self.sent_messages
            .write()
            .await
            .entry(*id)
            .or_default()
            .push_back(message.to_string());
    }

    async fn broadcast(&self, message: &str) {
        let connected = self.connected.read().await.clone();
        for id in connected {
            self.send_to_connection(&id, message).await;
        }
    }
}
