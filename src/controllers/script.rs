use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::parse_language;
use crate::{
    domain::script::{PaperMetadata, ScriptService, SectionName},
    error::{AppError, AppResult},
    infrastructure::{
        config::Config,
        repositories::{GeminiLlmRepository, LlmRepository, OllamaLlmRepository},
    },
};

/// Request for POST /api/scripts/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateScriptRequest {
    pub paper_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,
}

/// Response for POST /api/scripts/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateScriptResponse {
    pub paper_id: String,
    pub title_introduction: String,
    pub sections: HashMap<SectionName, String>,
}

pub struct ScriptController {
    config: Arc<Config>,
}

impl ScriptController {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Pick the LLM provider for one request: Gemini when a key is
    /// supplied or configured, the local Ollama server otherwise.
    fn resolve_llm(&self, override_key: Option<&str>) -> Arc<dyn LlmRepository> {
        let key = override_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| self.config.gemini_api_key.clone());

        match key {
            Some(key) => {
                tracing::info!(model = %self.config.gemini_model, "Using Gemini for script generation");
                Arc::new(GeminiLlmRepository::new(
                    key,
                    self.config.gemini_model.clone(),
                ))
            }
            None => {
                tracing::info!(
                    url = %self.config.ollama_url,
                    model = %self.config.ollama_model,
                    "No Gemini API key configured, using local Ollama"
                );
                Arc::new(OllamaLlmRepository::new(
                    self.config.ollama_url.clone(),
                    self.config.ollama_model.clone(),
                ))
            }
        }
    }

    /// POST /api/scripts/generate - turn extracted paper text into the
    /// narration script
    pub async fn generate(
        State(controller): State<Arc<ScriptController>>,
        Json(request): Json<GenerateScriptRequest>,
    ) -> AppResult<Json<GenerateScriptResponse>> {
        if request.paper_text.trim().is_empty() {
            return Err(AppError::BadRequest("Paper text cannot be empty".to_string()));
        }
        let language = parse_language(request.language.as_deref())?;

        let defaults = PaperMetadata::default();
        let metadata = PaperMetadata {
            title: request.title.unwrap_or(defaults.title),
            authors: request.authors.unwrap_or(defaults.authors),
            date: request.date.unwrap_or(defaults.date),
        };

        tracing::info!(
            paper_length = request.paper_text.len(),
            language = %language,
            "Script generation request"
        );

        let llm = controller.resolve_llm(request.gemini_api_key.as_deref());
        let service = ScriptService::new(llm);
        let script = service
            .generate(&request.paper_text, &metadata, language)
            .await
            .map_err(AppError::from)?;

        let paper_id = Uuid::new_v4().to_string();
        Ok(Json(GenerateScriptResponse {
            paper_id,
            title_introduction: script.title_introduction,
            sections: script.sections,
        }))
    }
}
