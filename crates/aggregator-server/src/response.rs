//! Response envelope helpers.
//!
//! Every body carries a `status` field: `"ok"` on success, a
//! human-readable message otherwise.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StatusMessage {
    status: String,
}

/// Build a response with the given code and status message.
pub fn status_response(code: StatusCode, status: impl Into<String>) -> Response {
    (
        code,
        Json(StatusMessage {
            status: status.into(),
        }),
    )
        .into_response()
}

/// `200 {"status":"ok"}`.
pub fn ok_response() -> Response {
    status_response(StatusCode::OK, "ok")
}

pub fn bad_request(message: impl Into<String>) -> Response {
    status_response(StatusCode::BAD_REQUEST, message)
}

pub fn not_found(message: impl Into<String>) -> Response {
    status_response(StatusCode::NOT_FOUND, message)
}

pub fn internal_server_error(message: impl Into<String>) -> Response {
    status_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}
