use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::session::ConnectionId;
use crate::websockets::BroadcastGateway;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<BroadcastGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<BroadcastGateway>) -> Self {
        Self { gateway }
    }
}

/// Reasons a session operation was rejected
///
/// The WebSocket protocol has no error channel, so the gateway logs these and
/// drops the request. HTTP surfaces map them to status codes.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not allowed: {0} is not the admin")]
    AuthorizationDenied(ConnectionId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown participant: {0}")]
    UnknownParticipant(ConnectionId),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::AuthorizationDenied(_) => StatusCode::FORBIDDEN,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownParticipant(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
