use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum NarrationError {
    #[error("no audio files were generated for paper {0}")]
    NoAudioProduced(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<NarrationError> for AppError {
    fn from(err: NarrationError) -> Self {
        match err {
            NarrationError::NoAudioProduced(_) => AppError::ExternalService(err.to_string()),
            NarrationError::Io(e) => AppError::Internal(e.to_string()),
        }
    }
}
