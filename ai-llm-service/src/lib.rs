//! Shared LLM service: one chat-completion capability over Ollama and
//! OpenAI-compatible servers, configured from `LLM_*` environment variables.

pub mod chat;
pub mod config;
pub mod error_handler;
pub mod services;

pub use chat::{ChatCompletion, ChatMessage, ChatOptions, ChatRole};
pub use config::default_config::{config_from_env, config_from_lookup};
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind, Result};
pub use services::LlmService;
