//! API response envelopes
//!
//! Success: `{ "success": true, "data": ..., "meta"?: ... }`
//! Failure: `{ "success": false, "error": { "code": ..., "message": ... } }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Standard success response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Standard error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// `400 VALIDATION_ERROR`
    pub fn validation(message: impl Into<String>) -> Response {
        (StatusCode::BAD_REQUEST, Json(Self::new("VALIDATION_ERROR", message))).into_response()
    }

    /// `404 NOT_FOUND`
    pub fn not_found(message: impl Into<String>) -> Response {
        (StatusCode::NOT_FOUND, Json(Self::new("NOT_FOUND", message))).into_response()
    }

    /// `500 INTERNAL_ERROR`; details are logged, never returned
    pub fn internal(context: &str, error: &dyn std::fmt::Display) -> Response {
        tracing::error!(error = %error, "{}", context);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Self::new("INTERNAL_ERROR", "An internal error occurred")),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let body = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(body, serde_json::json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn test_error_envelope() {
        let body = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "gone")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "gone");
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(ErrorResponse::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorResponse::internal("boom", &"db down").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
