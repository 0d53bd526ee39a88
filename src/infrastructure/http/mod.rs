use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    audio::AudioController, health, providers::ProvidersController, script::ScriptController,
};
use crate::infrastructure::config::Config;

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    providers_controller: Arc<ProvidersController>,
    script_controller: Arc<ScriptController>,
    audio_controller: Arc<AudioController>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Provider status routes
    let provider_routes = Router::new()
        .route("/api/providers/status", get(ProvidersController::status))
        .with_state(providers_controller);

    // Script generation routes
    let script_routes = Router::new()
        .route("/api/scripts/generate", post(ScriptController::generate))
        .with_state(script_controller);

    // Audio generation routes
    let audio_routes = Router::new()
        .route("/api/audio/generate", post(AudioController::generate))
        .with_state(audio_controller);

    // Build application routes
    let app = Router::new()
        .route("/health", get(health::health))
        .merge(provider_routes)
        .merge(script_routes)
        .merge(audio_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    // Start server
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
