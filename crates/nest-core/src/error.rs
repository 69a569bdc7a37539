use nest_domain::NestValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Nest not found: {0}")]
    NestNotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<NestValidationError> for CoreError {
    fn from(err: NestValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
