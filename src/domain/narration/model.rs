use crate::domain::language::Language;

/// Immutable per-run synthesis configuration, resolved before the first
/// chunk is synthesized and shared by every unit in the run.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    pub language: Language,
    pub voice: String,
    pub max_chunk_length: usize,
}

impl SynthesisConfig {
    /// Build a run configuration, filling the voice and chunk bound from
    /// the language defaults when the caller does not select them.
    pub fn new(language: Language, voice: Option<String>) -> Self {
        Self {
            language,
            voice: voice.unwrap_or_else(|| language.default_voice().to_string()),
            max_chunk_length: language.max_chunk_length(),
        }
    }
}
