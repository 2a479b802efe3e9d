//! Provider implementations and the config-driven dispatcher.

pub mod ollama_service;
pub mod open_ai_service;

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::info;

use crate::{
    chat::{ChatCompletion, ChatMessage, ChatOptions},
    config::{default_config::config_from_env, llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{ConfigError, ProviderError, ProviderErrorKind, Result},
};

use ollama_service::OllamaService;
use open_ai_service::OpenAiService;

/// Checks provider, model and endpoint; returns the endpoint without trailing slashes.
pub(crate) fn validated_base_url(cfg: &LlmModelConfig, expected: LlmProvider) -> Result<String> {
    if cfg.provider != expected {
        return Err(ProviderError::new(expected, ProviderErrorKind::InvalidProvider).into());
    }
    if cfg.model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }
    let endpoint = cfg.endpoint.trim();
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(ProviderError::new(
            expected,
            ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
        )
        .into());
    }
    Ok(cfg.base_url().to_string())
}

/// HTTP client with the configured timeout, JSON content type and `extra` headers.
pub(crate) fn build_client(cfg: &LlmModelConfig, mut extra: HeaderMap) -> Result<reqwest::Client> {
    extra.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_or_default()))
        .gzip(true)
        .brotli(true)
        .default_headers(extra)
        .build()?;
    Ok(client)
}

/// Whichever provider the config selects.
#[derive(Debug)]
pub enum LlmService {
    Ollama(OllamaService),
    OpenAI(OpenAiService),
}

impl LlmService {
    /// # Errors
    /// Provider construction errors (see [`OllamaService::new`], [`OpenAiService::new`]).
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        match cfg.provider {
            LlmProvider::Ollama => Ok(Self::Ollama(OllamaService::new(cfg)?)),
            LlmProvider::OpenAI => Ok(Self::OpenAI(OpenAiService::new(cfg)?)),
        }
    }

    /// Build from `LLM_*` environment variables; `Ok(None)` when `LLM_KIND` is unset.
    ///
    /// # Errors
    /// Config or provider construction errors.
    pub fn from_env() -> Result<Option<Self>> {
        match config_from_env()? {
            Some(cfg) => {
                let provider = cfg.provider;
                let svc = Self::new(cfg)?;
                info!(%provider, model = svc.model_name(), "LLM service configured");
                Ok(Some(svc))
            }
            None => Ok(None),
        }
    }

    pub fn provider(&self) -> LlmProvider {
        match self {
            Self::Ollama(_) => LlmProvider::Ollama,
            Self::OpenAI(_) => LlmProvider::OpenAI,
        }
    }
}

impl ChatCompletion for LlmService {
    async fn chat_completion(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String> {
        match self {
            Self::Ollama(s) => s.chat_completion(messages, options).await,
            Self::OpenAI(s) => s.chat_completion(messages, options).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Self::Ollama(s) => s.model_name(),
            Self::OpenAI(s) => s.model_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::AiLlmError;

    fn cfg(provider: LlmProvider, endpoint: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider,
            model: "m".into(),
            endpoint: endpoint.into(),
            api_key: Some("k".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn dispatches_on_provider() {
        let svc = LlmService::new(cfg(LlmProvider::Ollama, "http://localhost:11434")).unwrap();
        assert_eq!(svc.provider(), LlmProvider::Ollama);
        let svc = LlmService::new(cfg(LlmProvider::OpenAI, "https://api.openai.com")).unwrap();
        assert_eq!(svc.provider(), LlmProvider::OpenAI);
        assert_eq!(svc.model_name(), "m");
    }

    #[test]
    fn rejects_bad_endpoint() {
        let err = LlmService::new(cfg(LlmProvider::Ollama, "ftp://x")).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::InvalidEndpoint(_),
                ..
            })
        ));
    }
}
