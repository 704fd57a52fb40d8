use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockbook_core::DomainError;

/// Success envelope: `{"success": true, "data": <data>}`.
pub fn json_data(status: StatusCode, data: serde_json::Value) -> axum::response::Response {
    (
        status,
        Json(json!({
            "success": true,
            "data": data,
        })),
    )
        .into_response()
}

/// Shorthand for a 200 success envelope.
pub fn json_ok(data: serde_json::Value) -> axum::response::Response {
    json_data(StatusCode::OK, data)
}

/// Failure envelope: `{"success": false, "error": <message>}`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(json!({
            "success": false,
            "error": message.into(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let status = match &err {
        DomainError::Validation(_)
        | DomainError::InvalidId(_)
        | DomainError::InsufficientStock(_)
        | DomainError::PriceMismatch(_)
        | DomainError::TotalMismatch(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
    };
    json_error(status, err.to_string())
}
