use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::HeaderMap,
    response::Response,
};
use story_generator::{GenerationRequest, generate_story};
use tracing::{debug, info, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
};

/// Generate a story with the configured LLM, falling back to a placeholder
/// when no attempt validates. 503 when no LLM is configured.
#[instrument(name = "generate_story_route", skip_all, fields(prompt_len = body.prompt.len()))]
pub async fn generate_story_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<GenerationRequest>,
) -> AppResult<Response> {
    if let Some(id) = headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        debug!(%id, "request id attached");
    }
    let llm = state.llm.as_ref().ok_or(AppError::LlmUnavailable)?;

    let story = generate_story(llm, &state.validator, &state.inventory, &body, &state.generator).await?;

    info!(
        attempts = story.attempts,
        used_fallback = story.used_fallback,
        title = %story.title,
        "story generated"
    );
    Ok(ApiResponse::ok(story))
}
