//! LLM config loaded from environment variables.
//!
//! Generation is optional: with `LLM_KIND` unset the loaders return
//! `Ok(None)` and callers run without a model.
//!
//! # Environment variables
//!
//! - `LLM_KIND`         = provider kind (`ollama`, `openai`); unset disables generation
//! - `LLM_MODEL`        = model identifier (mandatory when `LLM_KIND` is set)
//! - `LLM_ENDPOINT`     = base URL (default per provider)
//! - `LLM_API_KEY`      = API key (mandatory for `openai`)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TEMPERATURE`  = optional temperature, `0.0..=2.0` (default `0.2`)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (default `120`)

use tracing::debug;

use crate::{
    config::{
        llm_model_config::{DEFAULT_TIMEOUT_SECS, LlmModelConfig},
        llm_provider::LlmProvider,
    },
    error_handler::{
        Result, must_var, opt_number, opt_var, validate_http_endpoint,
        validate_range_f32,
    },
};

/// Temperature used when `LLM_TEMPERATURE` is not set. Story code wants low variance.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Reads the model config from the process environment.
///
/// # Errors
/// Any `ConfigError` raised by [`config_from_lookup`].
pub fn config_from_env() -> Result<Option<LlmModelConfig>> {
    config_from_lookup(|k| std::env::var(k).ok())
}

/// Reads the model config through `get`, so tests can supply a map.
///
/// # Errors
/// - `ConfigError::UnsupportedProvider` for an unknown `LLM_KIND`
/// - `ConfigError::MissingVar` when `LLM_MODEL` is missing
/// - `ConfigError::InvalidFormat` for an endpoint without http/https
/// - `ConfigError::InvalidNumber` / `ConfigError::OutOfRange` for bad numbers
pub fn config_from_lookup<F>(get: F) -> Result<Option<LlmModelConfig>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(kind) = opt_var(&get, "LLM_KIND") else {
        debug!("LLM_KIND not set, generation disabled");
        return Ok(None);
    };
    let provider: LlmProvider = kind.parse()?;

    let model = must_var(&get, "LLM_MODEL")?;

    let endpoint =
        opt_var(&get, "LLM_ENDPOINT").unwrap_or_else(|| provider.default_endpoint().to_string());
    validate_http_endpoint("LLM_ENDPOINT", &endpoint)?;

    let max_tokens = opt_number::<u32, _>(&get, "LLM_MAX_TOKENS", "expected u32")?;
    let temperature = opt_number::<f32, _>(&get, "LLM_TEMPERATURE", "expected f32")?
        .unwrap_or(DEFAULT_TEMPERATURE);
    validate_range_f32("LLM_TEMPERATURE", temperature, 0.0, 2.0)?;
    let timeout_secs = opt_number::<u64, _>(&get, "LLM_TIMEOUT_SECS", "expected u64")?
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(Some(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key: opt_var(&get, "LLM_API_KEY"),
        max_tokens,
        temperature: Some(temperature),
        top_p: None,
        timeout_secs: Some(timeout_secs),
    }))
}
