use async_trait::async_trait;

/// Repository for LLM text generation.
/// Abstracts the underlying provider (Google Gemini, local Ollama, etc.)
///
/// Implementations are responsible for:
/// - Provider-specific request/response shapes
/// - Timeouts on the underlying HTTP call
/// - Returning the completion as plain text
#[async_trait]
pub trait LlmRepository: Send + Sync {
    /// Generate a completion for the given prompt
    ///
    /// # Errors
    /// Returns error if the provider is unreachable, rejects the request,
    /// or returns an empty completion
    async fn generate(&self, prompt: &str) -> Result<String, String>;
}
