use papercast_backend::controllers::{
    audio::AudioController, providers::ProvidersController, script::ScriptController,
};
use papercast_backend::domain::narration::NarrationService;
use papercast_backend::infrastructure::config::{Config, LogFormat};
use papercast_backend::infrastructure::http::start_http_server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Papercast Backend on {}:{}",
        config.host,
        config.port
    );

    tracing::info!(
        gemini_configured = config.gemini_api_key.is_some(),
        sarvam_configured = config.sarvam_api_key.is_some(),
        ollama_url = %config.ollama_url,
        audio_output_root = %config.audio_output_root.display(),
        "Provider configuration loaded"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate services
    tracing::info!("Instantiating services...");
    let narration_service = Arc::new(NarrationService::new(config.audio_output_root.clone()));

    // 2. Instantiate controllers (inject services and config)
    tracing::info!("Instantiating controllers...");
    let providers_controller = Arc::new(ProvidersController::new(config.clone()));
    let script_controller = Arc::new(ScriptController::new(config.clone()));
    let audio_controller = Arc::new(AudioController::new(narration_service, config.clone()));

    // Start HTTP server with all routes
    start_http_server(
        config,
        providers_controller,
        script_controller,
        audio_controller,
    )
    .await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "papercast_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "papercast_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
