use serde::Serialize;

/// Data of `POST /story/extract`; `code` is `null` when nothing was found.
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub code: Option<String>,
}

/// Data of `POST /story/fallback`.
#[derive(Debug, Serialize)]
pub struct FallbackResponse {
    pub code: String,
}
