use serde::Deserialize;

/// Body of `POST /story/validate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
    /// Candidate story source (raw model output is fine, fences are not stripped).
    pub code: String,
    /// Overrides `STORY_PRIMARY_IMPORT` for this call.
    #[serde(default)]
    pub primary_import_path: Option<String>,
    /// Overrides `STORY_MAX_RETRIES` for this call.
    #[serde(default)]
    pub max_retries: Option<usize>,
}

/// Body of `POST /story/extract`.
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Full LLM reply.
    pub text: String,
}

/// Body of `POST /story/fallback`.
#[derive(Debug, Deserialize)]
pub struct FallbackRequest {
    pub prompt: String,
    pub title: String,
    /// Any framework name; unknown names render the React skeleton.
    #[serde(default)]
    pub framework: Option<String>,
}
