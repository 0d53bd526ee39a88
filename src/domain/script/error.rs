use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ScriptServiceError {
    #[error("provider error: {0}")]
    Provider(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ScriptServiceError> for AppError {
    fn from(err: ScriptServiceError) -> Self {
        match err {
            ScriptServiceError::Provider(msg) => AppError::ExternalService(msg),
            ScriptServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ScriptServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
