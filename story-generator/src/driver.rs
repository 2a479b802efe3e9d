//! Generate, validate, correct, fall back.

use ai_llm_service::{ChatCompletion, ChatMessage, ChatOptions};
use serde::{Deserialize, Serialize};
use story_validator::{
    ComponentInventory, Framework, ValidationVerdict, Validator, extract_code_block, synthesize_fallback,
};
use tracing::{debug, info, instrument, warn};

use crate::config::GeneratorConfig;
use crate::errors::{GeneratorError, Result};
use crate::prompt::{corrective_message, system_message};
use crate::title::derive_title;

/// Error recorded for a reply without any recognizable code.
pub const NO_CODE_BLOCK: &str = "No code block found in the model reply";

/// What the caller wants a story for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Overrides [`GeneratorConfig::framework`].
    #[serde(default)]
    pub framework: Option<Framework>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            title: None,
            framework: None,
        }
    }
}

/// Outcome of [`generate_story`]. `code` is always loadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedStory {
    pub code: String,
    pub title: String,
    pub framework: Framework,
    /// LLM round-trips performed.
    pub attempts: usize,
    pub used_fallback: bool,
    /// Validator warnings of the accepted story (e.g. auto-fixes).
    pub warnings: Vec<String>,
    /// Errors of the last rejected attempt; empty on success.
    pub errors: Vec<String>,
}

/// Run the generation loop for `request`.
///
/// Each attempt sends the conversation so far, extracts the code block and
/// validates it against `inventory`. A rejected attempt appends the reply and
/// a corrective message listing the errors. After `config.max_attempts`
/// rejected attempts the fallback story is returned.
///
/// # Errors
/// [`GeneratorError::EmptyPrompt`] for a blank prompt and
/// [`GeneratorError::Llm`] when a completion call fails.
#[instrument(
    level = "debug",
    skip_all,
    fields(model = llm.model_name(), max_attempts = config.max_attempts)
)]
pub async fn generate_story<L: ChatCompletion>(
    llm: &L,
    validator: &Validator,
    inventory: &ComponentInventory,
    request: &GenerationRequest,
    config: &GeneratorConfig,
) -> Result<GeneratedStory> {
    let prompt = request.prompt.trim();
    if prompt.is_empty() {
        return Err(GeneratorError::EmptyPrompt);
    }

    let framework = request.framework.unwrap_or(config.framework);
    let title = request
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| derive_title(prompt), str::to_string);
    let primary = &validator.config().primary_import_path;

    let options = ChatOptions {
        temperature: config.temperature,
        ..ChatOptions::default()
    };
    let mut messages = vec![
        system_message(framework, primary, inventory),
        ChatMessage::user(prompt),
    ];
    let mut last_errors = Vec::new();

    for attempt in 1..=config.max_attempts {
        let reply = llm.chat_completion(&messages, &options).await?;

        let verdict = match extract_code_block(&reply) {
            Some(code) => {
                let verdict = validator.validate(&code, inventory);
                if verdict.is_valid {
                    info!(attempt, warnings = verdict.warnings.len(), "story accepted");
                    return Ok(GeneratedStory {
                        code: verdict.fixed_code.unwrap_or(code),
                        title,
                        framework,
                        attempts: attempt,
                        used_fallback: false,
                        warnings: verdict.warnings,
                        errors: Vec::new(),
                    });
                }
                verdict
            }
            None => {
                debug!(attempt, reply_len = reply.len(), "reply has no code block");
                ValidationVerdict::failed(vec![NO_CODE_BLOCK.to_string()], Vec::new())
            }
        };

        info!(attempt, errors = verdict.errors.len(), "story rejected");
        messages.push(ChatMessage::assistant(reply));
        messages.push(corrective_message(&verdict.errors));
        last_errors = verdict.errors;
    }

    warn!(
        attempts = config.max_attempts,
        errors = ?last_errors,
        "generation failed validation, using fallback story"
    );
    Ok(GeneratedStory {
        code: synthesize_fallback(prompt, &title, framework.as_str()),
        title,
        framework,
        attempts: config.max_attempts,
        used_fallback: true,
        warnings: Vec::new(),
        errors: last_errors,
    })
}
