use std::sync::Arc;

use ai_llm_service::ChatCompletion;
use axum::{extract::State, response::Response};
use serde::Serialize;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub components: usize,
    pub primary_import_path: String,
    pub llm_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_model: Option<String>,
}

/// Liveness plus a summary of what the service was started with.
pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let data = HealthResponse {
        status: "ok",
        components: state.inventory.len(),
        primary_import_path: state.validator.config().primary_import_path.clone(),
        llm_configured: state.llm.is_some(),
        llm_model: state.llm.as_ref().map(|l| l.model_name().to_string()),
    };
    ApiResponse::ok(data)
}
