use serde::{Deserialize, Serialize};

/// Narration languages supported by the TTS pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "gu")]
    Gujarati,
    #[serde(rename = "kn")]
    Kannada,
    #[serde(rename = "ml")]
    Malayalam,
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "or")]
    Odia,
    #[serde(rename = "pa")]
    Punjabi,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "te")]
    Telugu,
}

impl Language {
    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Bengali => "bn",
            Language::Gujarati => "gu",
            Language::Kannada => "kn",
            Language::Malayalam => "ml",
            Language::Marathi => "mr",
            Language::Odia => "or",
            Language::Punjabi => "pa",
            Language::Tamil => "ta",
            Language::Telugu => "te",
        }
    }

    /// English display name, as used in script prompts and section maps
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Bengali => "Bengali",
            Language::Gujarati => "Gujarati",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Marathi => "Marathi",
            Language::Odia => "Odia",
            Language::Punjabi => "Punjabi",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
        }
    }

    /// BCP-47-style code expected by the cloud TTS API (e.g. "hi-IN")
    pub fn tts_code(&self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Bengali => "bn-IN",
            Language::Gujarati => "gu-IN",
            Language::Kannada => "kn-IN",
            Language::Malayalam => "ml-IN",
            Language::Marathi => "mr-IN",
            Language::Odia => "od-IN",
            Language::Punjabi => "pa-IN",
            Language::Tamil => "ta-IN",
            Language::Telugu => "te-IN",
        }
    }

    /// Languages whose scripts stack vowel signs and conjuncts onto base
    /// consonants. Chunk lengths for these must be measured in grapheme
    /// clusters, not chars, and sentence splitting must recognize the
    /// Devanagari danda.
    pub fn has_complex_script(&self) -> bool {
        matches!(
            self,
            Language::Hindi | Language::Bengali | Language::Marathi | Language::Gujarati
        )
    }

    /// Default maximum chunk length for synthesis, in the language's
    /// length metric. Complex scripts get a smaller bound to offset the
    /// higher per-cluster audio duration variance.
    pub fn max_chunk_length(&self) -> usize {
        if self.has_complex_script() {
            450
        } else {
            500
        }
    }

    /// Default cloud voice when the caller does not select one
    pub fn default_voice(&self) -> &'static str {
        match self {
            Language::English => "meera",
            _ => "vidya",
        }
    }

    /// Parse a language from its English name or ISO code
    pub fn from_name(name: &str) -> Option<Self> {
        let all = [
            Language::English,
            Language::Hindi,
            Language::Bengali,
            Language::Gujarati,
            Language::Kannada,
            Language::Malayalam,
            Language::Marathi,
            Language::Odia,
            Language::Punjabi,
            Language::Tamil,
            Language::Telugu,
        ];
        let lowered = name.trim().to_lowercase();
        all.into_iter()
            .find(|l| l.name().to_lowercase() == lowered || l.as_str() == lowered)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_accepts_names_and_codes() {
        assert_eq!(Language::from_name("Hindi"), Some(Language::Hindi));
        assert_eq!(Language::from_name("hindi"), Some(Language::Hindi));
        assert_eq!(Language::from_name("hi"), Some(Language::Hindi));
        assert_eq!(Language::from_name("ta"), Some(Language::Tamil));
        assert_eq!(Language::from_name("Klingon"), None);
    }

    #[test]
    fn test_tts_codes_are_regional() {
        assert_eq!(Language::Hindi.tts_code(), "hi-IN");
        assert_eq!(Language::English.tts_code(), "en-IN");
    }

    #[test]
    fn test_complex_scripts_get_smaller_bound() {
        assert!(Language::Hindi.has_complex_script());
        assert!(Language::Bengali.has_complex_script());
        assert!(!Language::Tamil.has_complex_script());
        assert!(!Language::English.has_complex_script());
        assert_eq!(Language::Hindi.max_chunk_length(), 450);
        assert_eq!(Language::English.max_chunk_length(), 500);
    }
}
