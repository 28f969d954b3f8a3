// Public API - what other modules can use
pub use events::{ClientIntent, SessionEvent};
pub use handlers::get_session;
pub use lifecycle::ConnectionLifecycle;
pub use models::{
    ConnectionId, Estimate, Participant, Phase, RoundState, SessionSnapshot, ESTIMATE_SET,
};
pub use round::{RoundController, VOTING_WINDOW};
pub use store::SessionStore;
pub use timer::DeadlineTimer;

// Internal modules
mod events;
mod handlers;
mod lifecycle;
pub mod models;
mod round;
mod store;
mod timer;
