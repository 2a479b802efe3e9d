//! OpenAI-compatible service for chat completions.
//!
//! Minimal, non-streaming client around the OpenAI REST API. Works with any
//! server exposing the same route (vLLM, LM Studio, llama.cpp server, ...).
//! - `POST {endpoint}/v1/chat/completions`
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::OpenAI`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::Instant;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    chat::{ChatCompletion, ChatMessage, ChatOptions},
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, Result, make_snippet},
    services::{build_client, validated_base_url},
};

/// Thin client for the OpenAI chat API.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not OpenAI
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self> {
        let base = validated_base_url(&cfg, LlmProvider::OpenAI)?;

        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::new(LlmProvider::OpenAI, ProviderErrorKind::MissingApiKey))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                ProviderError::new(
                    LlmProvider::OpenAI,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );
        let client = build_client(&cfg, headers)?;
        let url_chat = format!("{base}/v1/chat/completions");

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_or_default(),
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    fn fail(&self, kind: ProviderErrorKind) -> AiLlmError {
        ProviderError::new(LlmProvider::OpenAI, kind).into()
    }
}

impl ChatCompletion for OpenAiService {
    /// Performs a single, non-streaming chat completion.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` / `EmptyChoices` for unusable bodies
    #[instrument(skip_all, fields(model = %self.cfg.model, messages = messages.len()))]
    async fn chat_completion(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String> {
        let started = Instant::now();
        let body = ChatCompletionRequest::new(&self.cfg, messages, options);

        debug!(endpoint = %self.cfg.endpoint, "POST {}", self.url_chat);
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
                "OpenAI /v1/chat/completions returned non-success status"
            );
            return Err(self.fail(ProviderErrorKind::HttpStatus(HttpError { status, url, snippet })));
        }

        let out: ChatCompletionResponse = resp.json().await.map_err(|e| {
            error!(error = %e, latency_ms = started.elapsed().as_millis(), "failed to decode chat response");
            self.fail(ProviderErrorKind::Decode(format!(
                "serde error: {e}; expected `choices[0].message.content`"
            )))
        })?;

        let content = first_content(out).ok_or_else(|| self.fail(ProviderErrorKind::EmptyChoices))?;

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

fn first_content(out: ChatCompletionResponse) -> Option<String> {
    out.choices
        .into_iter()
        .find_map(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Minimal request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(cfg: &'a LlmModelConfig, messages: &'a [ChatMessage], options: &ChatOptions) -> Self {
        Self {
            model: &cfg.model,
            messages,
            temperature: options.temperature.or(cfg.temperature),
            top_p: options.top_p.or(cfg.top_p),
            max_tokens: options.max_tokens.or(cfg.max_tokens),
        }
    }
}

/// Minimal response for `/v1/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::OpenAI,
            model: "gpt-4o-mini".into(),
            endpoint: "https://api.openai.com".into(),
            api_key: Some("sk-test".into()),
            max_tokens: None,
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn request_body() {
        let cfg = cfg();
        let messages = [ChatMessage::system("rules"), ChatMessage::user("story")];
        let opts = ChatOptions {
            max_tokens: Some(1000),
            ..ChatOptions::default()
        };
        let body = serde_json::to_value(ChatCompletionRequest::new(&cfg, &messages, &opts)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "rules"},
                    {"role": "user", "content": "story"}
                ],
                "temperature": 0.2f32,
                "max_tokens": 1000
            })
        );
    }

    #[test]
    fn picks_first_non_empty_choice() {
        let out: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"role": "assistant", "content": null}},
                {"message": {"role": "assistant", "content": "```tsx\n<div/>\n```"}}
            ]
        }))
        .unwrap();
        assert_eq!(first_content(out).as_deref(), Some("```tsx\n<div/>\n```"));

        let empty: ChatCompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(first_content(empty), None);
    }

    #[test]
    fn api_key_is_required() {
        let mut c = cfg();
        c.api_key = None;
        assert!(matches!(
            OpenAiService::new(c),
            Err(AiLlmError::Provider(ProviderError { kind: ProviderErrorKind::MissingApiKey, .. }))
        ));
        let svc = OpenAiService::new(cfg()).unwrap();
        assert_eq!(svc.url_chat, "https://api.openai.com/v1/chat/completions");
    }
}
