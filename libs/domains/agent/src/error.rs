use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("ChromaDB error: {0}")]
    Chroma(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AgentResult<T> = Result<T, AgentError>;

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::Internal(format!("JSON error: {}", err))
    }
}

impl From<core_config::ConfigError> for AgentError {
    fn from(err: core_config::ConfigError) -> Self {
        AgentError::Config(err.to_string())
    }
}

/// Convert AgentError to AppError for standardized HTTP error responses
impl From<AgentError> for AppError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Connection(msg) => {
                AppError::InternalServerError(format!("Connection error: {}", msg))
            }
            AgentError::Chroma(msg) => {
                AppError::InternalServerError(format!("ChromaDB error: {}", msg))
            }
            AgentError::Embedding(msg) => {
                AppError::InternalServerError(format!("Embedding error: {}", msg))
            }
            AgentError::Generation(msg) => {
                AppError::InternalServerError(format!("Generation error: {}", msg))
            }
            AgentError::Config(msg) => {
                AppError::InternalServerError(format!("Configuration error: {}", msg))
            }
            AgentError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
