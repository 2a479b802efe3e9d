//! Lightweight Ollama service for chat completions.
//!
//! Thin client for the local Ollama API:
//! - `POST {endpoint}/api/chat`, non-streaming (`stream=false`)
//!
//! It uses the universal configuration [`LlmModelConfig`] and ensures that
//! the selected provider is [`LlmProvider::Ollama`].
//!
//! # Examples
//!
//! ```no_run
//! use ai_llm_service::{ChatCompletion, ChatMessage, ChatOptions, LlmModelConfig, LlmProvider};
//! use ai_llm_service::services::ollama_service::OllamaService;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = LlmModelConfig {
//!     provider: LlmProvider::Ollama,
//!     model: "qwen2.5-coder:14b".into(),
//!     endpoint: "http://localhost:11434".into(),
//!     api_key: None,
//!     max_tokens: Some(2048),
//!     temperature: Some(0.2),
//!     top_p: None,
//!     timeout_secs: Some(120),
//! };
//!
//! let svc = OllamaService::new(cfg)?;
//! let reply = svc
//!     .chat_completion(&[ChatMessage::user("Write a Button story.")], &ChatOptions::default())
//!     .await?;
//! println!("{reply}");
//! # Ok(()) }
//! ```

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    chat::{ChatCompletion, ChatMessage, ChatOptions},
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, Result, make_snippet},
    services::{build_client, validated_base_url},
};

/// Thin client for Ollama.
#[derive(Debug)]
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Ollama
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::Config`] if the model name is empty
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        let base = validated_base_url(&cfg, LlmProvider::Ollama)?;
        let client = build_client(&cfg, reqwest::header::HeaderMap::new())?;
        let url_chat = format!("{base}/api/chat");

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_or_default(),
            "OllamaService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    fn fail(&self, kind: ProviderErrorKind) -> AiLlmError {
        ProviderError::new(LlmProvider::Ollama, kind).into()
    }
}

impl ChatCompletion for OllamaService {
    /// Performs a **non-streaming** chat request via `/api/chat`.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` / `EmptyChoices` for unusable bodies
    #[instrument(skip_all, fields(model = %self.cfg.model, messages = messages.len()))]
    async fn chat_completion(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String> {
        let started = Instant::now();
        let body = ChatRequest::new(&self.cfg, messages, options);

        debug!("POST {}", self.url_chat);
        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);
            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "Ollama /api/chat returned non-success status"
            );
            return Err(self.fail(ProviderErrorKind::HttpStatus(HttpError { status, url, snippet })));
        }

        let out: ChatResponse = resp.json().await.map_err(|e| {
            self.fail(ProviderErrorKind::Decode(format!(
                "serde error: {e}; ensure `stream=false` is used"
            )))
        })?;

        let content = out
            .message
            .map(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| self.fail(ProviderErrorKind::EmptyChoices))?;

        info!(
            latency_ms = started.elapsed().as_millis(),
            reply_len = content.len(),
            "chat completion completed"
        );
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.cfg.model
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/api/chat`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "OllamaOptions::is_empty")]
    options: OllamaOptions,
}

impl<'a> ChatRequest<'a> {
    /// Builds the request; per-call options win over config values.
    fn new(cfg: &'a LlmModelConfig, messages: &'a [ChatMessage], options: &ChatOptions) -> Self {
        Self {
            model: &cfg.model,
            messages,
            stream: false,
            options: OllamaOptions {
                temperature: options.temperature.or(cfg.temperature),
                top_p: options.top_p.or(cfg.top_p),
                num_predict: options.max_tokens.or(cfg.max_tokens),
            },
        }
    }
}

/// Generation options (`options` object of Ollama).
#[derive(Debug, Default, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

impl OllamaOptions {
    fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.top_p.is_none() && self.num_predict.is_none()
    }
}

/// Response body for `/api/chat`; the reply is in `message.content`.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::ConfigError;
    use serde_json::json;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "qwen2.5-coder".into(),
            endpoint: "http://localhost:11434/".into(),
            api_key: None,
            max_tokens: Some(512),
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn request_body_merges_options() {
        let cfg = cfg();
        let messages = [ChatMessage::user("hi")];
        let opts = ChatOptions {
            temperature: Some(0.9),
            ..ChatOptions::default()
        };
        let body = serde_json::to_value(ChatRequest::new(&cfg, &messages, &opts)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "qwen2.5-coder",
                "messages": [{"role": "user", "content": "hi"}],
                "stream": false,
                "options": {"temperature": 0.9f32, "num_predict": 512}
            })
        );
    }

    #[test]
    fn empty_options_are_omitted() {
        let mut cfg = cfg();
        cfg.max_tokens = None;
        cfg.temperature = None;
        let body = serde_json::to_value(ChatRequest::new(&cfg, &[], &ChatOptions::default())).unwrap();
        assert!(body.get("options").is_none());
    }

    #[test]
    fn response_decoding() {
        let out: ChatResponse =
            serde_json::from_value(json!({"model": "m", "message": {"role": "assistant", "content": "ok"}, "done": true}))
                .unwrap();
        assert_eq!(out.message.unwrap().content, "ok");
    }

    #[test]
    fn constructor_validation() {
        let svc = OllamaService::new(cfg()).unwrap();
        assert_eq!(svc.url_chat, "http://localhost:11434/api/chat");
        assert_eq!(svc.model_name(), "qwen2.5-coder");

        let mut wrong = cfg();
        wrong.provider = LlmProvider::OpenAI;
        assert!(matches!(
            OllamaService::new(wrong),
            Err(AiLlmError::Provider(ProviderError { kind: ProviderErrorKind::InvalidProvider, .. }))
        ));

        let mut no_model = cfg();
        no_model.model = " ".into();
        assert!(matches!(
            OllamaService::new(no_model),
            Err(AiLlmError::Config(ConfigError::EmptyModel))
        ));
    }
}
