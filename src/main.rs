//! Placefinder-RS: An LLM-assisted place search gateway written in Rust
//!
//! This is the main entry point for the application.

use anyhow::Result;
use placefinder_rs::{
    config::Settings,
    network::HttpClient,
    web::{create_router, AppState},
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Starting Placefinder-RS v{}", placefinder_rs::VERSION);

    // Load configuration from the environment, once
    let settings = Settings::from_env();
    if let Some(llm) = &settings.llm {
        info!("Completion service configured, model: {}", llm.model);
    }
    if settings.places.api_key.is_none() {
        info!("GOOGLE_MAPS_API_KEY not set, place searches will be rejected");
    }

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Bind address
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    // Create application state and router
    let state = AppState::new(settings, client);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
