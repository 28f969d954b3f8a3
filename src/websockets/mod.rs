// Public API
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use gateway::BroadcastGateway;
pub use handler::{parse_intent, websocket_handler, WebsocketReceiveHandler};
pub use messages::{MessageType, WebSocketMessage};
pub use socket::{MessageHandler, SocketError, SocketWrapper};

// Internal modules
mod connection_manager;
mod gateway;
mod handler;
pub mod messages;
mod socket;
