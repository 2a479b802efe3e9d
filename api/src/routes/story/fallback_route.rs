use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::Response,
};
use story_validator::synthesize_fallback;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::story::{story_request::FallbackRequest, story_response::FallbackResponse},
};

/// Render the placeholder story; the framework defaults to `STORY_FRAMEWORK`.
pub async fn fallback_story_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FallbackRequest>,
) -> Response {
    let framework = body
        .framework
        .unwrap_or_else(|| state.generator.framework.as_str().to_string());
    let code = synthesize_fallback(&body.prompt, &body.title, &framework);
    ApiResponse::ok(FallbackResponse { code })
}
