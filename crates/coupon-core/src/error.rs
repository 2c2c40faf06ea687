//! # Error Types
//!
//! Domain-specific error types for coupon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  coupon-core errors (this file)                                        │
//! │  ├── CoreError        - Coupon lookup / applicability failures         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  coupon-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  coupon-api errors (in app)                                            │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (coupon ID, field, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every failure is local and final for the invocation; nothing is retried

use thiserror::Error;

use crate::coupon::CouponId;

// =============================================================================
// Core Error
// =============================================================================

/// Coupon engine errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The referenced coupon is not in the catalog.
    #[error("Coupon with ID {0} not found")]
    CouponNotFound(CouponId),

    /// The stored coupon kind is outside the closed set the engine knows.
    ///
    /// ## When This Occurs
    /// Only when storage holds a row written by something other than this
    /// workspace; every write path goes through `CouponRule`.
    #[error("Unsupported coupon type: {0}")]
    UnsupportedKind(String),

    /// A stored coupon of a known kind whose details don't decode.
    #[error("Coupon {id} has malformed details: {reason}")]
    MalformedCoupon { id: CouponId, reason: String },

    /// The coupon exists but its rule rejects the cart.
    ///
    /// Carries no reason; callers list applicable coupons to find out which
    /// ones qualify.
    #[error("Coupon {0} is not applicable to this cart")]
    NotApplicable(CouponId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when coupon parameters or carts don't meet requirements.
/// Used at the storage/transport boundary, before the engine runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., details that don't match the coupon type).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Collection has too many entries.
    #[error("{field} cannot have more than {max} entries")]
    TooMany { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::CouponNotFound(999).to_string(),
            "Coupon with ID 999 not found"
        );
        assert_eq!(
            CoreError::NotApplicable(4).to_string(),
            "Coupon 4 is not applicable to this cart"
        );
        assert_eq!(
            CoreError::UnsupportedKind("flat-fee".to_string()).to_string(),
            "Unsupported coupon type: flat-fee"
        );
    }

    #[test]
    fn test_malformed_coupon_message() {
        let err = CoreError::MalformedCoupon {
            id: 3,
            reason: "missing field `repetition_limit`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Coupon 3 has malformed details: missing field `repetition_limit`"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "repetition_limit".to_string(),
        };
        assert_eq!(err.to_string(), "repetition_limit must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
