//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use planning_poker::{ConnectionId, MessageType, Participant, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    players: Vec<(String, ConnectionId)>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for all players still in the setup
    pub fn for_all_players(setup: &'a TestSetup) -> Self {
        Self {
            setup,
            players: setup.players.clone(),
        }
    }

    /// Create an assertion for specific players
    pub fn for_players(setup: &'a TestSetup, names: Vec<&str>) -> Self {
        let players = names
            .into_iter()
            .map(|name| (name.to_string(), setup.id(name)))
            .collect();
        Self { setup, players }
    }

    /// Assert that players received a specific message type (consumes the message from queue)
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let mut messages = vec![];

        for (name, id) in &self.players {
            let message = self.setup.mock_conn_manager.consume_message_for(id).await;
            assert!(message.is_some(), "{} should have received a message", name);

            let msg: WebSocketMessage = serde_json::from_str(&message.unwrap()).unwrap();
            assert_eq!(
                msg.message_type, expected_type,
                "{} received wrong message type",
                name
            );
            messages.push(msg);
        }

        // Broadcasts must be identical for everyone
        for (i, msg) in messages.iter().enumerate().skip(1) {
            assert_eq!(
                &msg.payload, &messages[0].payload,
                "{} payload differs from {}",
                self.players[i].0, self.players[0].0
            );
        }

        MessageContent {
            payload: messages[0].payload.clone(),
        }
    }

    /// Assert that players received no messages
    pub async fn received_no_messages(self) {
        for (name, id) in &self.players {
            let messages = self.setup.mock_conn_manager.get_messages_for(id).await;
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                name,
                messages
            );
        }
    }
}

pub struct MessageContent {
    pub payload: serde_json::Value,
}

impl MessageContent {
    pub fn players(&self) -> Vec<Participant> {
        serde_json::from_value(self.payload["players"].clone()).unwrap()
    }

    pub fn player(&self, id: ConnectionId) -> Participant {
        self.players()
            .into_iter()
            .find(|p| p.id == id)
            .expect("player should be in roster")
    }

    pub fn with_player_count(self, expected: usize) -> Self {
        assert_eq!(self.players().len(), expected, "unexpected roster size");
        self
    }

    pub fn with_no_votes(self) -> Self {
        assert!(
            self.players().iter().all(|p| p.vote.is_none()),
            "all votes should be cleared"
        );
        self
    }
}
