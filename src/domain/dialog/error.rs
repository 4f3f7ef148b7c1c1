use crate::domain::generation::GenerationError;
use crate::domain::tts::SynthesisError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum DialogServiceError {
    #[error("invalid dialog input: {0}")]
    InvalidInput(String),
    #[error("generate dialog: {0}")]
    Generation(#[from] GenerationError),
    #[error("synthesize dialog: {0}")]
    Synthesis(#[from] SynthesisError),
    #[error("persist dialog: {0}")]
    Persistence(String),
    #[error("dialog not found")]
    NotFound,
}

impl From<AppError> for DialogServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => DialogServiceError::InvalidInput(msg),
            AppError::NotFound(_) => DialogServiceError::NotFound,
            _ => DialogServiceError::Persistence(err.to_string()),
        }
    }
}

/// Provider and database details stay in the logs; callers only get the stage that failed.
impl From<DialogServiceError> for AppError {
    fn from(err: DialogServiceError) -> Self {
        match err {
            DialogServiceError::InvalidInput(msg) => AppError::BadRequest(msg),
            DialogServiceError::NotFound => AppError::NotFound("Dialog not found".to_string()),
            DialogServiceError::Generation(e) => {
                tracing::error!(error = %e, "Dialog generation failed");
                AppError::ExternalService("Dialog generation failed".to_string())
            }
            DialogServiceError::Synthesis(e) => {
                tracing::error!(error = %e, turn = e.turn, "Dialog synthesis failed");
                AppError::ExternalService("Audio synthesis failed".to_string())
            }
            DialogServiceError::Persistence(msg) => {
                tracing::error!(error = %msg, "Dialog storage failed");
                AppError::Internal("Dialog storage failed".to_string())
            }
        }
    }
}
