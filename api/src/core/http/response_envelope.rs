use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{success, data?, error?}` envelope returned by every route.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Stable machine code, e.g. `LLM_UNAVAILABLE`.
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ApiErrorDetail>,
}

/// Points the client at the offending request field.
#[derive(Debug, Serialize)]
pub struct ApiErrorDetail {
    /// Request field, e.g. `prompt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>, details: Vec<ApiErrorDetail>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
                details,
            }),
        }
    }

    /// `200 OK` with `data`.
    pub fn ok(data: T) -> Response {
        Self::success(data).into_response_with_status(StatusCode::OK)
    }

    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_omits_error() {
        let v = serde_json::to_value(ApiResponse::success(json!({"code": null}))).unwrap();
        assert_eq!(v, json!({"success": true, "data": {"code": null}}));
    }

    #[test]
    fn error_omits_data_and_empty_details() {
        let v = serde_json::to_value(ApiResponse::<()>::error("BAD_REQUEST", "nope", Vec::new())).unwrap();
        assert_eq!(
            v,
            json!({"success": false, "error": {"code": "BAD_REQUEST", "message": "nope"}})
        );
    }

    #[test]
    fn details_are_listed() {
        let detail = ApiErrorDetail {
            path: Some("prompt".into()),
            hint: None,
        };
        let v = serde_json::to_value(ApiResponse::<()>::error("BAD_REQUEST", "x", vec![detail])).unwrap();
        assert_eq!(v["error"]["details"], json!([{"path": "prompt"}]));
    }
}
