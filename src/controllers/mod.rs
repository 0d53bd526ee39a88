pub mod audio;
pub mod health;
pub mod providers;
pub mod script;

use crate::domain::language::Language;
use crate::error::AppError;

/// Parse an optional request language, defaulting to English
pub(crate) fn parse_language(language: Option<&str>) -> Result<Language, AppError> {
    match language {
        None => Ok(Language::English),
        Some(name) => {
            Language::from_name(name).ok_or_else(|| AppError::UnsupportedLanguage(name.to_string()))
        }
    }
}
