use super::llm_repository::LlmRepository;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Availability probe must not stall callers when the server is down
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Local Ollama implementation of the LLM repository
pub struct OllamaLlmRepository {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaLlmRepository {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// Check whether the local server answers at all
    pub async fn check_available(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl LlmRepository for OllamaLlmRepository {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        tracing::info!(
            model = %self.model,
            url = %self.base_url,
            prompt_length = prompt.len(),
            "Calling Ollama generate"
        );

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": {
                    "temperature": 0.3,
                    "num_ctx": 4096
                }
            }))
            .send()
            .await
            .map_err(|e| format!("Ollama request failed: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                model = %self.model,
                "Ollama generate failed"
            );
            return Err(format!("Ollama error {}: {}", status, body));
        }

        let payload: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| format!("cannot parse Ollama response: {}", e))?;

        if payload.response.trim().is_empty() {
            return Err("Ollama returned an empty completion".to_string());
        }

        tracing::debug!(
            completion_length = payload.response.len(),
            "Ollama completion received"
        );
        Ok(payload.response)
    }
}
