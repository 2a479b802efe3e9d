use axum::{extract::Json, response::Response};
use story_validator::extract_code_block;

use crate::{
    core::http::response_envelope::ApiResponse,
    routes::story::{story_request::ExtractRequest, story_response::ExtractResponse},
};

/// Pull the story source out of a chat reply.
pub async fn extract_code_route(Json(body): Json<ExtractRequest>) -> Response {
    let code = extract_code_block(&body.text);
    ApiResponse::ok(ExtractResponse { code })
}
