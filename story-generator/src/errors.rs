//! Error type of the generation driver.
//!
//! Only transport/config problems are errors. A story that never validates is
//! a normal outcome and ends in the fallback.

use ai_llm_service::AiLlmError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// LLM call failed (network, HTTP status, undecodable body).
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error("invalid value in {var}: {reason}")]
    InvalidConfig {
        var: &'static str,
        reason: &'static str,
    },

    #[error("empty prompt")]
    EmptyPrompt,
}
