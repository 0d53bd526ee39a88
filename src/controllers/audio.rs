use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::parse_language;
use crate::{
    domain::narration::{NarrationService, SynthesisConfig},
    domain::script::{ScriptSet, SectionName},
    error::{AppError, AppResult},
    infrastructure::{config::Config, speech::SpeechBackend},
};

/// Request for POST /api/audio/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAudioRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub title_introduction: String,
    #[serde(default)]
    pub sections: HashMap<SectionName, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sarvam_api_key: Option<String>,
}

/// Response for POST /api/audio/generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAudioResponse {
    pub paper_id: String,
    pub audio_files: Vec<String>,
}

pub struct AudioController {
    narration_service: Arc<NarrationService>,
    config: Arc<Config>,
}

impl AudioController {
    pub fn new(narration_service: Arc<NarrationService>, config: Arc<Config>) -> Self {
        Self {
            narration_service,
            config,
        }
    }

    /// POST /api/audio/generate - synthesize narration audio for a script
    pub async fn generate(
        State(controller): State<Arc<AudioController>>,
        Json(request): Json<GenerateAudioRequest>,
    ) -> AppResult<Json<GenerateAudioResponse>> {
        let language = parse_language(request.language.as_deref())?;

        let script = ScriptSet {
            title_introduction: request.title_introduction,
            sections: request.sections,
        };
        if script.units().iter().all(|u| u.text.trim().is_empty()) {
            return Err(AppError::BadRequest(
                "Script contains no narratable text".to_string(),
            ));
        }

        let paper_id = request
            .paper_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        tracing::info!(
            paper_id = %paper_id,
            language = %language,
            "Audio generation request"
        );

        // Resolve the synthesis route once; every chunk in the run reuses it.
        let credential = request
            .sarvam_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .or(controller.config.sarvam_api_key.as_deref());
        let backend = SpeechBackend::resolve(credential).await;

        let voice = request.voice.filter(|v| !v.trim().is_empty());
        let synthesis_config = SynthesisConfig::new(language, voice);

        let audio_files = controller
            .narration_service
            .generate(&backend, &synthesis_config, &paper_id, &script)
            .await
            .map_err(AppError::from)?;

        Ok(Json(GenerateAudioResponse {
            paper_id,
            audio_files,
        }))
    }
}
