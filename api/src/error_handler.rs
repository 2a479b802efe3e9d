use ai_llm_service::AiLlmError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use story_generator::GeneratorError;
use story_validator::ValidatorError;
use thiserror::Error;
use tracing::error;

use crate::core::http::response_envelope::ApiResponse;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("configuration error: {0}")]
    Config(String),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    // --- Generation ---
    #[error("no LLM is configured; set LLM_KIND to enable generation")]
    LlmUnavailable,

    #[error(transparent)]
    Llm(AiLlmError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::LlmUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Llm(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_) | AppError::Bind { .. } | AppError::Server(_) | AppError::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Join(_) => "JOIN_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::LlmUnavailable => "LLM_UNAVAILABLE",
            AppError::Llm(_) => "LLM_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "request failed");
        }
        ApiResponse::<()>::error(self.error_code(), self.to_string(), Vec::new())
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidatorError> for AppError {
    fn from(err: ValidatorError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Config problems of the LLM layer are startup errors; everything else is
/// an upstream failure.
impl From<AiLlmError> for AppError {
    fn from(err: AiLlmError) -> Self {
        match err {
            AiLlmError::Config(e) => AppError::Config(e.to_string()),
            other => AppError::Llm(other),
        }
    }
}

impl From<GeneratorError> for AppError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Llm(e) => e.into(),
            GeneratorError::EmptyPrompt => AppError::BadRequest("`prompt` must not be empty".into()),
            e @ GeneratorError::InvalidConfig { .. } => AppError::Config(e.to_string()),
        }
    }
}
