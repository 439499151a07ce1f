use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::ApiResponse;

/// Standard success response.
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// Success response with a human-readable message.
pub fn message_response<T: Serialize>(message: &str, data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::success_with_message(message, data)),
    )
        .into_response()
}

/// Created response with a human-readable message.
pub fn created_response<T: Serialize>(message: &str, data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(message, data)),
    )
        .into_response()
}
