pub mod local;
pub mod sarvam;

pub use local::LocalSpeechEngine;
pub use sarvam::SarvamTtsClient;

use crate::domain::narration::SynthesisConfig;
use std::path::Path;

/// The synthesis route for a run, resolved once before the first chunk
/// and reused for every chunk after it.
pub enum SpeechBackend {
    Cloud(SarvamTtsClient),
    Local(LocalSpeechEngine),
}

impl SpeechBackend {
    /// Decide cloud vs local synthesis for this run.
    ///
    /// No credential selects the local engine unconditionally. With a
    /// credential, a connectivity probe decides: success keeps the cloud
    /// backend, any failure degrades to local.
    pub async fn resolve(sarvam_api_key: Option<&str>) -> SpeechBackend {
        let key = sarvam_api_key.map(str::trim).unwrap_or("");
        if key.is_empty() {
            tracing::info!("Sarvam API key not configured, using local speech engine");
            return SpeechBackend::Local(LocalSpeechEngine::default());
        }

        let client = SarvamTtsClient::new(key.to_string());
        if client.test_connection().await {
            tracing::info!("Connected to Sarvam TTS API, using cloud synthesis");
            SpeechBackend::Cloud(client)
        } else {
            tracing::warn!(
                "Sarvam TTS connectivity probe failed, falling back to local speech engine"
            );
            SpeechBackend::Local(LocalSpeechEngine::default())
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            SpeechBackend::Cloud(_) => "cloud",
            SpeechBackend::Local(_) => "local",
        }
    }

    /// Synthesize one chunk into `segment_path`.
    ///
    /// Failures are returned, never raised: each chunk is independent and
    /// a failed one must not abort its siblings.
    pub async fn synthesize_chunk(
        &self,
        text: &str,
        config: &SynthesisConfig,
        segment_path: &Path,
    ) -> Result<(), String> {
        match self {
            SpeechBackend::Cloud(client) => {
                let audio = client
                    .synthesize(text, config.language.tts_code(), &config.voice)
                    .await?;
                if audio.is_empty() {
                    return Err("cloud synthesis returned empty audio".to_string());
                }
                if let Some(parent) = segment_path.parent() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| format!("cannot create segment directory: {}", e))?;
                }
                tokio::fs::write(segment_path, &audio)
                    .await
                    .map_err(|e| format!("cannot write segment file: {}", e))
            }
            SpeechBackend::Local(engine) => {
                engine
                    .synthesize_to_file(text, config.language, segment_path)
                    .await
            }
        }
    }
}
