use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

use vision_common::error::ScanError;

pub type ApiResult<T> = Result<T, ApiError>;

const PROBLEM_JSON: &str = "application/problem+json";

#[derive(Debug)]
pub enum ApiError {
    /// A scan that failed or was rejected. Rendered as `{ error, errorOutput }`.
    BadRequest { error: String, error_output: String },
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::BadRequest {
            error: error.into(),
            error_output: String::new(),
        }
    }

    pub fn scan_failed(error: impl Into<String>, error_output: impl Into<String>) -> Self {
        Self::BadRequest {
            error: error.into(),
            error_output: error_output.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest { error, .. } => write!(f, "{error}"),
            Self::NotFound(message) | Self::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::BadRequest { error, error_output } => (
                status,
                Json(json!({ "error": error, "errorOutput": error_output })),
            )
                .into_response(),
            Self::NotFound(detail) | Self::Internal(detail) => {
                let body = json!({
                    "type": "about:blank",
                    "title": status.canonical_reason().unwrap_or("Error"),
                    "status": status.as_u16(),
                    "detail": detail,
                });
                (status, [(header::CONTENT_TYPE, PROBLEM_JSON)], body.to_string()).into_response()
            }
        }
    }
}

impl From<ScanError> for ApiError {
    fn from(err: ScanError) -> Self {
        if !err.is_client_error() {
            error!(error = %err, "scan fault");
            return Self::internal(err.to_string());
        }

        match err {
            ScanError::InvalidRequest(msg) => Self::bad_request(msg),
            other => Self::bad_request(other.to_string()),
        }
    }
}
