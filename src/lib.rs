// Library crate for the planning poker server
// This file exposes the public API for integration tests

pub mod config;
pub mod session;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use config::ServerConfig;
pub use session::{ClientIntent, ConnectionId, Estimate, Participant, Phase, SessionSnapshot};
pub use shared::{AppError, AppState};
pub use websockets::{
    BroadcastGateway, ConnectionManager, InMemoryConnectionManager, MessageHandler, MessageType,
    WebSocketMessage, WebsocketReceiveHandler,
};
