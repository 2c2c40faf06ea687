//! # Coupon Evaluation Service
//!
//! The two operations callers actually use: list every coupon that gives a
//! cart a discount, and apply one coupon by id.
//!
//! Both are free functions over immutable inputs. Coupon lookup goes through
//! the [`CouponCatalog`] trait so the same code serves an in-memory list and
//! rows fetched from storage.

use std::collections::HashMap;
use std::hash::BuildHasher;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartTotals};
use crate::coupon::{Coupon, CouponId, CouponKind, CouponRecord, CouponRule};
use crate::engine;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Catalog
// =============================================================================

/// By-id lookup of coupon definitions.
///
/// `Ok(None)` means the id is unknown. `Err` means the coupon exists but
/// cannot be decoded, e.g. a stored kind outside the supported set.
pub trait CouponCatalog {
    fn find_coupon(&self, id: CouponId) -> CoreResult<Option<Coupon>>;
}

impl CouponCatalog for [Coupon] {
    fn find_coupon(&self, id: CouponId) -> CoreResult<Option<Coupon>> {
        Ok(self.iter().find(|coupon| coupon.id == id).cloned())
    }
}

impl CouponCatalog for [CouponRecord] {
    fn find_coupon(&self, id: CouponId) -> CoreResult<Option<Coupon>> {
        self.iter()
            .find(|record| record.id == id)
            .cloned()
            .map(Coupon::try_from)
            .transpose()
    }
}

impl<T> CouponCatalog for Vec<T>
where
    [T]: CouponCatalog,
{
    fn find_coupon(&self, id: CouponId) -> CoreResult<Option<Coupon>> {
        self.as_slice().find_coupon(id)
    }
}

impl<S: BuildHasher> CouponCatalog for HashMap<CouponId, Coupon, S> {
    fn find_coupon(&self, id: CouponId) -> CoreResult<Option<Coupon>> {
        Ok(self.get(&id).cloned())
    }
}

// =============================================================================
// Results
// =============================================================================

/// A coupon that gives the cart a non-zero discount.
///
/// Serializes as `{"coupon_id", "discount_cents", "type", "details"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicableCoupon {
    pub coupon_id: CouponId,
    pub discount_cents: i64,
    #[serde(flatten)]
    pub rule: CouponRule,
}

impl ApplicableCoupon {
    pub fn kind(&self) -> CouponKind {
        self.rule.kind()
    }

    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }
}

/// Outcome of applying one coupon.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCoupon {
    /// Copy of the input cart with per-line discounts filled in.
    pub cart: Cart,
    pub discount: Money,
    pub coupon: Coupon,
}

impl AppliedCoupon {
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Every coupon in `coupons` that applies to `cart` with a positive discount,
/// in input order.
pub fn list_applicable(cart: &Cart, coupons: &[Coupon], now: DateTime<Utc>) -> Vec<ApplicableCoupon> {
    coupons
        .iter()
        .filter(|coupon| engine::is_applicable(coupon, cart, now))
        .filter_map(|coupon| {
            let discount = engine::calculate_discount(coupon, cart, now);
            discount.is_positive().then(|| ApplicableCoupon {
                coupon_id: coupon.id,
                discount_cents: discount.cents(),
                rule: coupon.rule.clone(),
            })
        })
        .collect()
}

/// Applies the coupon `coupon_id` from `catalog` to `cart`.
///
/// ## Errors
/// - `CoreError::CouponNotFound` if the catalog has no such coupon
/// - `CoreError::UnsupportedKind` / `CoreError::MalformedCoupon` if the stored
///   coupon cannot be decoded
/// - `CoreError::NotApplicable` if the coupon's rule rejects the cart
///   (inactive and expired coupons included)
pub fn apply_coupon<C>(
    cart: &Cart,
    coupon_id: CouponId,
    catalog: &C,
    now: DateTime<Utc>,
) -> CoreResult<AppliedCoupon>
where
    C: CouponCatalog + ?Sized,
{
    let coupon = catalog
        .find_coupon(coupon_id)?
        .ok_or(CoreError::CouponNotFound(coupon_id))?;

    if !engine::is_applicable(&coupon, cart, now) {
        return Err(CoreError::NotApplicable(coupon_id));
    }

    let (cart, discount) = engine::apply(&coupon, cart, now);
    Ok(AppliedCoupon {
        cart,
        discount,
        coupon,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
