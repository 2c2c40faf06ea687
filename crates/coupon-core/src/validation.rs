//! # Validation Module
//!
//! Boundary validation for coupon definitions and carts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shape: `type` selects exactly one parameter struct                │
//! │  └── DiscountRate rejects percentages outside 0..=100                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (API handlers, before storage or engine)         │
//! │  ├── Thresholds, caps, quantities, repetition limits                   │
//! │  └── Cart line sanity                                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine                                                        │
//! │  └── Assumes validated input; never does speculative lookups           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coupon_core::validation::{validate_coupon_name, validate_quantity};
//!
//! validate_coupon_name("Summer 10%").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::cart::Cart;
use crate::coupon::{BuyXGetYParams, BxGyProduct, CartWiseParams, CouponRule, ProductWiseParams};
use crate::error::ValidationError;
use crate::{MAX_CART_ITEMS, MAX_COUPON_NAME_LEN, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Coupon Validators
// =============================================================================

/// Validates a coupon name.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
///
/// ## Example
/// ```rust
/// use coupon_core::validation::validate_coupon_name;
///
/// assert!(validate_coupon_name("BOGO Chips").is_ok());
/// assert!(validate_coupon_name("").is_err());
/// ```
pub fn validate_coupon_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_COUPON_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_COUPON_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates the parameters of any rule kind.
pub fn validate_rule(rule: &CouponRule) -> ValidationResult<()> {
    match rule {
        CouponRule::CartWise(params) => validate_cart_wise(params),
        CouponRule::ProductWise(params) => validate_product_wise(params),
        CouponRule::BuyXGetY(params) => validate_buy_x_get_y(params),
    }
}

/// Cart-wise: positive threshold, positive cap when present.
pub fn validate_cart_wise(params: &CartWiseParams) -> ValidationResult<()> {
    positive("threshold_cents", params.threshold_cents)?;
    validate_cap(params.max_discount_cents)
}

/// Product-wise: positive product id, `min_quantity >= 1`, positive cap when present.
pub fn validate_product_wise(params: &ProductWiseParams) -> ValidationResult<()> {
    positive("product_id", params.product_id)?;
    positive("min_quantity", params.min_quantity)?;
    validate_cap(params.max_discount_cents)
}

/// Buy-X-get-Y: both product lists non-empty, every quantity and the
/// repetition limit within `1..=MAX_ITEM_QUANTITY`.
pub fn validate_buy_x_get_y(params: &BuyXGetYParams) -> ValidationResult<()> {
    validate_bxgy_products("buy_products", &params.buy_products)?;
    validate_bxgy_products("get_products", &params.get_products)?;
    bounded("repetition_limit", params.repetition_limit)
}

fn validate_bxgy_products(field: &str, products: &[BxGyProduct]) -> ValidationResult<()> {
    if products.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    for product in products {
        positive(&format!("{field}.product_id"), product.product_id)?;
        bounded(&format!("{field}.quantity"), product.quantity)?;
    }

    Ok(())
}

fn validate_cap(max_discount_cents: Option<i64>) -> ValidationResult<()> {
    match max_discount_cents {
        Some(cap) => positive("max_discount_cents", cap),
        None => Ok(()),
    }
}

fn bounded(field: &str, value: i64) -> ValidationResult<()> {
    positive(field, value)?;
    if value > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

fn positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in cents. Zero is allowed (free items); the upper
/// bound is MAX_UNIT_PRICE_CENTS.
///
/// ## Example
/// ```rust
/// use coupon_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit_price_cents".to_string(),
        });
    }

    if cents > MAX_UNIT_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "unit_price_cents".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a cart snapshot before it reaches the engine.
///
/// ## Rules
/// - At most MAX_CART_ITEMS (100) lines
/// - Every line passes [`validate_quantity`] and [`validate_price_cents`]
///
/// An empty cart is valid; it simply qualifies for nothing.
pub fn validate_cart(cart: &Cart) -> ValidationResult<()> {
    if cart.items.len() > MAX_CART_ITEMS {
        return Err(ValidationError::TooMany {
            field: "items".to_string(),
            max: MAX_CART_ITEMS,
        });
    }

    for item in &cart.items {
        validate_quantity(item.quantity)?;
        validate_price_cents(item.unit_price_cents)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
