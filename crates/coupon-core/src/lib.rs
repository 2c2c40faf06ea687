//! # coupon-core: Pure Coupon Engine
//!
//! This crate decides which coupons apply to a cart, what each one is worth,
//! and how an applied discount spreads over the cart's lines. It has zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Coupon Service Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    coupon-api (axum)                            │   │
//! │  │   /coupons CRUD  •  /applicable-coupons  •  /apply-coupon/{id}  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ coupon-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  coupon   │  │   cart    │  │  engine   │  │  service  │  │   │
//! │  │   │  Coupon   │  │   Cart    │  │ evaluate  │  │   list    │  │   │
//! │  │   │CouponRule │  │ CartItem  │  │ calculate │  │   apply   │  │   │
//! │  │   └───────────┘  └───────────┘  │   apply   │  └───────────┘  │   │
//! │  │                                 └───────────┘                  │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 coupon-db (Database Layer)                      │   │
//! │  │            SQLite coupon catalog, migrations, seed              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`coupon`] - Coupon definitions, rule parameters, stored records
//! - [`cart`] - Cart snapshot and totals
//! - [`money`] - Money type with integer arithmetic
//! - [`engine`] - Eligibility, discount and application per coupon kind
//! - [`service`] - List applicable coupons, apply one by id
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation at the boundary
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: the evaluation instant is an argument, never read from a clock
//! 2. **No I/O**: storage and transport live in other crates
//! 3. **Integer Money**: all monetary values are in cents (i64)
//! 4. **Closed Kinds**: `CouponRule` is an enum and every kind is handled by `match`
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use coupon_core::{apply_coupon, Cart, CartItem, CartWiseParams, Coupon, CouponRule, DiscountRate};
//!
//! let coupon = Coupon {
//!     id: 1,
//!     name: "10% off over $100".to_string(),
//!     rule: CouponRule::CartWise(CartWiseParams {
//!         threshold_cents: 10000,
//!         discount_percent: DiscountRate::from_bps(1000),
//!         max_discount_cents: None,
//!     }),
//!     is_active: true,
//!     created_at: Utc::now(),
//!     expires_at: None,
//! };
//!
//! let cart = Cart::new(vec![
//!     CartItem::new(1, 3, 5000),
//!     CartItem::new(2, 2, 3000),
//!     CartItem::new(3, 1, 2500),
//! ]);
//!
//! let applied = apply_coupon(&cart, 1, [coupon].as_slice(), Utc::now()).unwrap();
//! assert_eq!(applied.discount.cents(), 2350);
//! assert_eq!(applied.totals().final_price_cents, 21150);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod coupon;
pub mod engine;
pub mod error;
pub mod money;
pub mod service;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem, CartTotals};
pub use coupon::*;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use service::{apply_coupon, list_applicable, AppliedCoupon, ApplicableCoupon, CouponCatalog};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single cart line.
///
/// ## Business Reason
/// Catches typos (1000 instead of 10) before they turn into huge discounts.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum unit price of a cart line, in cents ($100,000,000.00).
///
/// A full cart at this price (`MAX_CART_ITEMS × MAX_ITEM_QUANTITY × price`)
/// stays far below `i64::MAX`.
pub const MAX_UNIT_PRICE_CENTS: i64 = 10_000_000_000;

/// Maximum length of a coupon name, in characters.
pub const MAX_COUPON_NAME_LEN: usize = 100;
