//! # Coupon Engine
//!
//! Eligibility, discount calculation and cart application for every coupon
//! kind, dispatched by `match` over [`CouponRule`].
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Coupon + Cart + now                                                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  is_live(now)?  ── no ──►  not applicable, discount 0                   │
//! │        │ yes                                                            │
//! │        ▼                                                                │
//! │  match rule { CartWise | ProductWise | BuyXGetY }                       │
//! │        │                                                                │
//! │        ├── is_applicable       → bool                                   │
//! │        ├── calculate_discount  → Money (0 when not applicable)          │
//! │        └── apply               → (new Cart, Money)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure. The input cart is never mutated and the
//! evaluation instant is passed in, so identical inputs give identical output.

pub mod bxgy;
pub mod cart_wise;
pub mod product_wise;

use chrono::{DateTime, Utc};

use crate::cart::Cart;
use crate::coupon::{Coupon, CouponRule};
use crate::money::Money;

/// Whether `coupon` may be applied to `cart` at `now`.
///
/// An inactive or expired coupon is never applicable, whatever its rule says.
pub fn is_applicable(coupon: &Coupon, cart: &Cart, now: DateTime<Utc>) -> bool {
    if !coupon.is_live(now) {
        return false;
    }

    match &coupon.rule {
        CouponRule::CartWise(params) => cart_wise::is_applicable(params, cart),
        CouponRule::ProductWise(params) => product_wise::is_applicable(params, cart),
        CouponRule::BuyXGetY(params) => bxgy::is_applicable(params, cart),
    }
}

/// Discount `coupon` would grant on `cart` at `now`; zero when not applicable.
pub fn calculate_discount(coupon: &Coupon, cart: &Cart, now: DateTime<Utc>) -> Money {
    if !coupon.is_live(now) {
        return Money::zero();
    }

    match &coupon.rule {
        CouponRule::CartWise(params) => cart_wise::calculate_discount(params, cart),
        CouponRule::ProductWise(params) => product_wise::calculate_discount(params, cart),
        CouponRule::BuyXGetY(params) => bxgy::calculate_discount(params, cart),
    }
}

/// Returns a copy of `cart` with the coupon's discount attributed to its
/// lines, together with the discount itself.
///
/// Discounts already present on the incoming lines are discarded.
pub fn apply(coupon: &Coupon, cart: &Cart, now: DateTime<Utc>) -> (Cart, Money) {
    if !coupon.is_live(now) {
        return (cart.without_discounts(), Money::zero());
    }

    match &coupon.rule {
        CouponRule::CartWise(params) => cart_wise::apply(params, cart),
        CouponRule::ProductWise(params) => product_wise::apply(params, cart),
        CouponRule::BuyXGetY(params) => bxgy::apply(params, cart),
    }
}
