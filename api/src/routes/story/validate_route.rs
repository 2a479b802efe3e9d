use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::Response,
};
use story_validator::Validator;
use tracing::{debug, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    routes::story::story_request::ValidateRequest,
};

/// Validate (and auto-repair) a candidate story against the loaded inventory.
///
/// A failed verdict is still a successful request: the verdict carries the
/// errors. Parsing runs on the blocking pool.
#[instrument(name = "validate_story_route", skip_all, fields(len = body.code.len()))]
pub async fn validate_story_route(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ValidateRequest>,
) -> AppResult<Response> {
    let overridden = body.primary_import_path.is_some() || body.max_retries.is_some();
    let custom = if overridden {
        let mut cfg = state.validator.config().clone();
        if let Some(path) = body.primary_import_path {
            cfg.primary_import_path = path;
        }
        if let Some(n) = body.max_retries {
            cfg.max_retries = n;
        }
        Some(Validator::new(cfg)?)
    } else {
        None
    };

    let code = body.code;
    let verdict = tokio::task::spawn_blocking(move || {
        let validator = custom.as_ref().unwrap_or(&state.validator);
        validator.validate(&code, &state.inventory)
    })
    .await?;

    debug!(
        valid = verdict.is_valid,
        errors = verdict.errors.len(),
        repaired = verdict.fixed_code.is_some(),
        "validation finished"
    );
    Ok(ApiResponse::ok(verdict))
}
