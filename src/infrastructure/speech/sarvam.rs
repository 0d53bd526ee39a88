use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const SARVAM_TTS_URL: &str = "https://api.sarvam.ai/text-to-speech";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The connectivity probe must answer quickly so runs can degrade to the
/// local engine without stalling
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Sarvam text-to-speech REST API
pub struct SarvamTtsClient {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct SarvamTtsResponse {
    #[serde(default)]
    audios: Vec<String>,
}

impl SarvamTtsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Remap logical voice names to the identifiers the current API
    /// accepts. Fixed at call time, not configurable per chunk.
    fn resolve_voice(voice: &str) -> &str {
        match voice {
            "meera" => "vidya",
            "arjun" => "karun",
            other => other,
        }
    }

    /// Lightweight connectivity and auth probe: synthesize a single word.
    /// Any failure means the cloud backend is unusable for this run.
    pub async fn test_connection(&self) -> bool {
        let result = self
            .request_synthesis("hello", "en-IN", "vidya", PROBE_TIMEOUT)
            .await;
        match result {
            Ok(audio) => !audio.is_empty(),
            Err(reason) => {
                tracing::debug!(error = %reason, "Sarvam connectivity probe failed");
                false
            }
        }
    }

    /// Synthesize one chunk of text, returning raw audio bytes.
    /// Fails closed: every transport or API problem becomes an `Err`,
    /// never a panic, so a bad chunk cannot abort its siblings.
    pub async fn synthesize(
        &self,
        text: &str,
        target_language: &str,
        voice: &str,
    ) -> Result<Vec<u8>, String> {
        let speaker = Self::resolve_voice(voice);

        tracing::info!(
            language = target_language,
            voice = speaker,
            text_length = text.len(),
            "Calling Sarvam text-to-speech"
        );

        self.request_synthesis(text, target_language, speaker, REQUEST_TIMEOUT)
            .await
    }

    async fn request_synthesis(
        &self,
        text: &str,
        target_language: &str,
        speaker: &str,
        timeout: Duration,
    ) -> Result<Vec<u8>, String> {
        let response = self
            .client
            .post(SARVAM_TTS_URL)
            .header("api-subscription-key", &self.api_key)
            .timeout(timeout)
            .json(&json!({
                "inputs": [text],
                "target_language_code": target_language,
                "speaker": speaker,
                "model": "bulbul:v2",
                "speech_sample_rate": 22050,
            }))
            .send()
            .await
            .map_err(|e| format!("Sarvam request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Sarvam API error {}: {}", status, body));
        }

        let payload: SarvamTtsResponse = response
            .json()
            .await
            .map_err(|e| format!("cannot parse Sarvam response: {}", e))?;

        let encoded = payload
            .audios
            .first()
            .filter(|a| !a.is_empty())
            .ok_or_else(|| "Sarvam returned an empty audio payload".to_string())?;

        BASE64
            .decode(encoded)
            .map_err(|e| format!("cannot decode Sarvam audio payload: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_aliases_are_remapped() {
        assert_eq!(SarvamTtsClient::resolve_voice("meera"), "vidya");
        assert_eq!(SarvamTtsClient::resolve_voice("arjun"), "karun");
        assert_eq!(SarvamTtsClient::resolve_voice("anushka"), "anushka");
    }
}
