//! API error handling.
//!
//! Every failure leaves the service as `{"code": "...", "message": "..."}`
//! with a matching HTTP status.
//!
//! ```text
//! CoreError / ValidationError / DbError / JsonRejection
//!         │
//!         ▼
//!     ApiError { status, code, message }
//!         │
//!         ▼
//!     HTTP response
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coupon_core::{CoreError, ValidationError};
use coupon_db::DbError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    NotApplicable,
    UnsupportedCoupon,
    DatabaseError,
    Internal,
}

impl ErrorCode {
    pub const fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::NotApplicable | ErrorCode::UnsupportedCoupon => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error returned by every handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Internal failures are logged in full; the client only sees a generic message.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Internal error");
        Self::new(ErrorCode::Internal, "Internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::CouponNotFound(_) => ErrorCode::NotFound,
            CoreError::UnsupportedKind(_) | CoreError::MalformedCoupon { .. } => {
                ErrorCode::UnsupportedCoupon
            }
            CoreError::NotApplicable(_) => ErrorCode::NotApplicable,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::Core(core) => ApiError::from(core),
            DbError::Serialization(e) => ApiError::internal(e),
            other => {
                error!(error = %other, "Database error");
                ApiError::new(ErrorCode::DatabaseError, "Database error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CoreError::CouponNotFound(9), StatusCode::NOT_FOUND, ErrorCode::NotFound)]
    #[case(CoreError::NotApplicable(9), StatusCode::BAD_REQUEST, ErrorCode::NotApplicable)]
    #[case(
        CoreError::UnsupportedKind("x".to_string()),
        StatusCode::BAD_REQUEST,
        ErrorCode::UnsupportedCoupon
    )]
    #[case(
        CoreError::MalformedCoupon { id: 9, reason: "x".to_string() },
        StatusCode::BAD_REQUEST,
        ErrorCode::UnsupportedCoupon
    )]
    fn test_core_error_mapping(
        #[case] err: CoreError,
        #[case] status: StatusCode,
        #[case] code: ErrorCode,
    ) {
        let api = ApiError::from(err);
        assert_eq!(api.status(), status);
        assert_eq!(api.code, code);
    }

    #[test]
    fn test_db_errors_hide_details() {
        let api = ApiError::from(DbError::QueryFailed("no such table: coupons".to_string()));
        assert_eq!(api.code, ErrorCode::DatabaseError);
        assert_eq!(api.message, "Database error");
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_db_not_found_is_404() {
        let api = ApiError::from(DbError::not_found("Coupon", 3));
        assert_eq!(api.status(), StatusCode::NOT_FOUND);
        assert_eq!(api.message, "Coupon with ID 3 not found");
    }

    #[test]
    fn test_error_code_wire_format() {
        let json = serde_json::to_value(ApiError::validation("name is required")).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "name is required");
    }
}
