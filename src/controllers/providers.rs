use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::config::Config;
use crate::infrastructure::repositories::OllamaLlmRepository;

pub struct ProvidersController {
    config: Arc<Config>,
}

impl ProvidersController {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// GET /api/providers/status - report which providers this instance
    /// can use. Keys come from configuration (or per-request overrides),
    /// never from mutable server-side storage.
    pub async fn status(State(controller): State<Arc<ProvidersController>>) -> impl IntoResponse {
        let ollama = OllamaLlmRepository::new(
            controller.config.ollama_url.clone(),
            controller.config.ollama_model.clone(),
        );
        let ollama_available = ollama.check_available().await;

        Json(json!({
            "gemini_configured": controller.config.gemini_api_key.is_some(),
            "sarvam_configured": controller.config.sarvam_api_key.is_some(),
            "ollama_available": ollama_available,
        }))
    }
}
