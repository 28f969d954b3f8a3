use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

use crate::session::ConnectionId;

/// Registry of outbound channels, one per open socket
///
/// Delivery is fire-and-forget: a send to a closed channel is dropped.
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, id: ConnectionId, sender: mpsc::UnboundedSender<String>);

    async fn remove_connection(&self, id: &ConnectionId);

    async fn send_to_connection(&self, id: &ConnectionId, message: &str);

    async fn broadcast(&self, message: &str);
}

pub struct InMemoryConnectionManager {
    connections: Arc<RwLock<HashMap<ConnectionId, mpsc::UnboundedSender<String>>>>,
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, id: ConnectionId, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.write().await;
        connections.insert(id, sender);
    }

    async fn remove_connection(&self, id: &ConnectionId) {
        let mut connections = self.connections.write().await;
        connections.remove(id);
    }

    async fn send_to_connection(&self, id: &ConnectionId, message: &str) {
        let connections = self.connections.read().await;
        if let Some(sender) = connections.get(id) {
            let _ = sender.send(message.to_string());
        }
    }

    async fn broadcast(&self, message: &str) {
        let connections = self.connections.read().await;
        debug!(receivers = connections.len(), "Broadcasting message");
        for sender in connections.values() {
            let _ = sender.send(message.to_string());
        }
    }
}
