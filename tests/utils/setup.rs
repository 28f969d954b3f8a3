use std::sync::Arc;
use tokio::sync::mpsc;

use planning_poker::{BroadcastGateway, ConnectionId, WebsocketReceiveHandler};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub gateway: Arc<BroadcastGateway>,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: WebsocketReceiveHandler,
    /// (display name, connection) in join order; the first one is admin
    pub players: Vec<(String, ConnectionId)>,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self { players: vec![] }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_one_player(self) -> Self {
        self.with_players(vec!["alice"])
    }

    pub fn with_two_players(self) -> Self {
        self.with_players(vec!["alice", "bob"])
    }

    pub fn with_three_players(self) -> Self {
        self.with_players(vec!["alice", "bob", "charlie"])
    }

    /// Connect and name every player, then forget the setup traffic
    pub async fn build(self) -> TestSetup {
        let mock_conn_manager = Arc::new(MockConnectionManager::new());
        let gateway = BroadcastGateway::new(mock_conn_manager.clone());
        let input_handler = WebsocketReceiveHandler::new(gateway.clone());

        let mut setup = TestSetup {
            gateway,
            mock_conn_manager,
            input_handler,
            players: vec![],
        };

        for name in self.players {
            let id = setup.connect().await;
            setup.send_set_name(id, &name).await;
            setup.players.push((name, id));
        }

        setup.clear_messages().await;
        setup
    }
}

impl TestSetup {
    /// Connection of a named player
    pub fn id(&self, name: &str) -> ConnectionId {
        self.players
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, id)| *id)
            .unwrap_or_else(|| panic!("no player named {name}"))
    }

    /// Open a new connection without naming it
    pub async fn connect(&self) -> ConnectionId {
        let id = ConnectionId::new();
        let (sender, _receiver) = mpsc::unbounded_channel();
        self.gateway.connect(id, sender).await;
        id
    }
}
