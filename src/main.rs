use axum::{routing::get, Router};
use planning_poker::{
    session, websockets, AppState, BroadcastGateway, InMemoryConnectionManager, ServerConfig,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting planning poker server");

    let connection_manager = Arc::new(InMemoryConnectionManager::new());
    let gateway = BroadcastGateway::new(connection_manager);
    let app_state = AppState::new(gateway);

    let app = Router::new()
        .route("/ws", get(websockets::websocket_handler))
        .route("/session", get(session::get_session))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Planning poker running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
