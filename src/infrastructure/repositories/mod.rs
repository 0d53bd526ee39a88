pub mod gemini_llm_repository;
pub mod llm_repository;
pub mod ollama_llm_repository;

pub use gemini_llm_repository::GeminiLlmRepository;
pub use llm_repository::LlmRepository;
pub use ollama_llm_repository::OllamaLlmRepository;
