//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use super::types::{ApiResponse, AppError};
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::OrderNotFound | Self::TableNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::OrderAlreadyPaid => StatusCode::CONFLICT,

            // 422 Unprocessable Entity
            Self::OrderInvalidTransition | Self::PaymentInsufficientAmount => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::OrderEmpty
            | Self::PaymentInvalidMethod => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            Self::Unknown | Self::PaymentFailed | Self::InternalError | Self::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        (status, Json(ApiResponse::<()>::error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_for_already_paid() {
        assert_eq!(
            ErrorCode::OrderAlreadyPaid.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn insufficient_is_unprocessable() {
        assert_eq!(
            ErrorCode::PaymentInsufficientAmount.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
