use std::result::Result as StdResult;

use nest_config::ConfigError;
use nest_core::CoreError;
use thiserror::Error;

/// Unified error type for the application layer and CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid input: {0}")]
    Input(String),
}

pub type Result<T> = StdResult<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Core(CoreError::Serde(err.to_string()))
    }
}
