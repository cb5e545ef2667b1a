use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::Error;

/// Map an error to the status and JSON body the caller observes.
///
/// Upstream failure details stay in the log and are replaced by a fixed
/// message; every other internal error surfaces its message verbatim.
pub fn error_response(err: &Error) -> (StatusCode, Value) {
    match err {
        Error::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        Error::MethodNotAllowed => (
            StatusCode::METHOD_NOT_ALLOWED,
            json!({ "error": "Method not allowed" }),
        ),
        Error::Configuration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
        Error::Upstream(detail) => {
            tracing::error!("Image generation failed: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Failed to generate image" }),
            )
        }
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": other.to_string() }),
        ),
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, body) = error_response(&self);
        (status, Json(body)).into_response()
    }
}
