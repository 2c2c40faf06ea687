//! # Coupon Types
//!
//! Coupon definitions and their kind-specific parameters.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Coupon Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────────────────────┐   │
//! │  │     Coupon      │        │            CouponRule                │   │
//! │  │  ─────────────  │        │  ──────────────────────────────────  │   │
//! │  │  id             │        │  CartWise(CartWiseParams)            │   │
//! │  │  name           │ rule   │  ProductWise(ProductWiseParams)      │   │
//! │  │  is_active      │───────►│  BuyXGetY(BuyXGetYParams)            │   │
//! │  │  created_at     │        └──────────────────────────────────────┘   │
//! │  │  expires_at     │                                                    │
//! │  └─────────────────┘        ┌──────────────────────────────────────┐   │
//! │          ▲                  │   CouponRecord (storage shape)       │   │
//! │          └── TryFrom ───────│   kind: String, details: JSON text   │   │
//! │                             └──────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The rule is flattened into the coupon as `type` + `details`:
//! ```json
//! {
//!   "id": 1,
//!   "name": "10% off over $100",
//!   "type": "cart-wise",
//!   "details": { "threshold_cents": 10000, "discount_percent": 10.0 },
//!   "is_active": true,
//!   "created_at": "2026-01-01T00:00:00Z",
//!   "expires_at": null
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Storage-assigned coupon identifier.
pub type CouponId = i64;

/// Catalog product identifier, as carried by cart lines and coupon rules.
pub type ProductId = i64;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so 1000 bps = 10%.
/// Rates arrive on the wire as a decimal percent (`12.5`) and are held as
/// integers so discount math never touches floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100% in basis points.
    pub const MAX_BPS: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a percentage, rejecting values outside 0..=100.
    pub fn from_percentage(pct: f64) -> Result<Self, ValidationError> {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return Err(ValidationError::OutOfRange {
                field: "discount_percent".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(DiscountRate((pct * 100.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl TryFrom<f64> for DiscountRate {
    type Error = ValidationError;

    fn try_from(pct: f64) -> Result<Self, Self::Error> {
        DiscountRate::from_percentage(pct)
    }
}

impl From<DiscountRate> for f64 {
    fn from(rate: DiscountRate) -> Self {
        rate.percentage()
    }
}

// =============================================================================
// Coupon Kind
// =============================================================================

/// The closed set of coupon families the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CouponKind {
    /// Percentage off the whole cart above a threshold.
    #[serde(rename = "cart-wise")]
    CartWise,
    /// Percentage off one product's line.
    #[serde(rename = "product-wise")]
    ProductWise,
    /// Free "get" units for purchased "buy" units.
    #[serde(rename = "bxgy")]
    BuyXGetY,
}

impl CouponKind {
    /// Stable storage/wire name of the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CouponKind::CartWise => "cart-wise",
            CouponKind::ProductWise => "product-wise",
            CouponKind::BuyXGetY => "bxgy",
        }
    }
}

impl fmt::Display for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CouponKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart-wise" => Ok(CouponKind::CartWise),
            "product-wise" => Ok(CouponKind::ProductWise),
            "bxgy" => Ok(CouponKind::BuyXGetY),
            other => Err(CoreError::UnsupportedKind(other.to_string())),
        }
    }
}

// =============================================================================
// Rule Parameters
// =============================================================================

/// Parameters of a cart-wise coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartWiseParams {
    /// Minimum cart total, in cents.
    pub threshold_cents: i64,
    pub discount_percent: DiscountRate,
    /// Upper bound on the discount, in cents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount_cents: Option<i64>,
}

impl CartWiseParams {
    #[inline]
    pub fn threshold(&self) -> Money {
        Money::from_cents(self.threshold_cents)
    }

    #[inline]
    pub fn max_discount(&self) -> Option<Money> {
        self.max_discount_cents.map(Money::from_cents)
    }
}

fn default_min_quantity() -> i64 {
    1
}

/// Parameters of a product-wise coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWiseParams {
    pub product_id: ProductId,
    pub discount_percent: DiscountRate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount_cents: Option<i64>,
    /// Quantity a single matching line must reach.
    #[serde(default = "default_min_quantity")]
    pub min_quantity: i64,
}

impl ProductWiseParams {
    #[inline]
    pub fn max_discount(&self) -> Option<Money> {
        self.max_discount_cents.map(Money::from_cents)
    }
}

/// A (product, quantity) pair on either side of a buy-X-get-Y rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BxGyProduct {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Parameters of a buy-X-get-Y coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyXGetYParams {
    pub buy_products: Vec<BxGyProduct>,
    pub get_products: Vec<BxGyProduct>,
    /// Maximum number of times the rule may be multiplied in one application.
    pub repetition_limit: i64,
}

impl BuyXGetYParams {
    /// Units of buy products one application of the rule requires.
    pub fn required_buy_quantity(&self) -> i64 {
        self.buy_products
            .iter()
            .fold(0i64, |acc, p| acc.saturating_add(p.quantity))
    }
}

// =============================================================================
// Coupon Rule
// =============================================================================

/// A coupon's kind together with its strongly typed parameters.
///
/// Serialized adjacently tagged: `{"type": "cart-wise", "details": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum CouponRule {
    #[serde(rename = "cart-wise")]
    CartWise(CartWiseParams),
    #[serde(rename = "product-wise")]
    ProductWise(ProductWiseParams),
    #[serde(rename = "bxgy")]
    BuyXGetY(BuyXGetYParams),
}

impl CouponRule {
    /// Returns the kind tag of this rule.
    pub const fn kind(&self) -> CouponKind {
        match self {
            CouponRule::CartWise(_) => CouponKind::CartWise,
            CouponRule::ProductWise(_) => CouponKind::ProductWise,
            CouponRule::BuyXGetY(_) => CouponKind::BuyXGetY,
        }
    }

    /// Decodes a stored `(kind, details)` pair.
    ///
    /// ## Errors
    /// - `CoreError::UnsupportedKind` for a kind outside the closed set
    /// - `CoreError::Validation` when the details do not match the kind's shape
    pub fn from_stored(kind: &str, details: &str) -> CoreResult<Self> {
        let kind: CouponKind = kind.parse()?;
        let rule = match kind {
            CouponKind::CartWise => serde_json::from_str(details).map(CouponRule::CartWise),
            CouponKind::ProductWise => serde_json::from_str(details).map(CouponRule::ProductWise),
            CouponKind::BuyXGetY => serde_json::from_str(details).map(CouponRule::BuyXGetY),
        };
        rule.map_err(|e| {
            CoreError::from(ValidationError::InvalidFormat {
                field: "details".to_string(),
                reason: e.to_string(),
            })
        })
    }

    /// Encodes the parameters as the JSON text stored next to the kind.
    pub fn details_json(&self) -> serde_json::Result<String> {
        match self {
            CouponRule::CartWise(params) => serde_json::to_string(params),
            CouponRule::ProductWise(params) => serde_json::to_string(params),
            CouponRule::BuyXGetY(params) => serde_json::to_string(params),
        }
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A fully decoded coupon definition, as the engine consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponId,
    pub name: String,
    #[serde(flatten)]
    pub rule: CouponRule,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Coupon {
    #[inline]
    pub fn kind(&self) -> CouponKind {
        self.rule.kind()
    }

    /// A coupon expires once `now` is strictly past `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    /// Active and not expired: the precondition shared by every rule.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }
}

// =============================================================================
// Coupon Record
// =============================================================================

/// A coupon row exactly as storage holds it: kind and details as text.
///
/// Storage never interprets the details; the engine decodes them with
/// `Coupon::try_from`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CouponRecord {
    pub id: CouponId,
    pub name: String,
    pub kind: String,
    /// Kind-specific parameters as JSON text.
    pub details: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Fails with `UnsupportedKind` for an unknown kind and `MalformedCoupon`
/// when a known kind's details don't decode.
impl TryFrom<CouponRecord> for Coupon {
    type Error = CoreError;

    fn try_from(record: CouponRecord) -> CoreResult<Self> {
        let rule = CouponRule::from_stored(&record.kind, &record.details).map_err(|e| match e {
            CoreError::Validation(reason) => CoreError::MalformedCoupon {
                id: record.id,
                reason: reason.to_string(),
            },
            other => other,
        })?;
        Ok(Coupon {
            id: record.id,
            name: record.name,
            rule,
            is_active: record.is_active,
            created_at: record.created_at,
            expires_at: record.expires_at,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn record(kind: &str, details: &str) -> CouponRecord {
        CouponRecord {
            id: 7,
            name: "Test".to_string(),
            kind: kind.to_string(),
            details: details.to_string(),
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            expires_at: None,
        }
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        let rate = DiscountRate::from_percentage(12.5).unwrap();
        assert_eq!(rate.bps(), 1250);
        assert!((rate.percentage() - 12.5).abs() < 0.001);
    }

    #[test]
    fn test_discount_rate_rejects_out_of_range() {
        assert!(DiscountRate::from_percentage(-1.0).is_err());
        assert!(DiscountRate::from_percentage(100.5).is_err());
        assert!(DiscountRate::from_percentage(f64::NAN).is_err());
        assert!(DiscountRate::from_percentage(100.0).is_ok());
        assert!(DiscountRate::from_percentage(0.0).is_ok());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("cart-wise".parse::<CouponKind>().unwrap(), CouponKind::CartWise);
        assert_eq!("bxgy".parse::<CouponKind>().unwrap(), CouponKind::BuyXGetY);
        assert!(matches!(
            "flat-fee".parse::<CouponKind>(),
            Err(CoreError::UnsupportedKind(kind)) if kind == "flat-fee"
        ));
    }

    #[test]
    fn test_min_quantity_defaults_to_one() {
        let params: ProductWiseParams =
            serde_json::from_str(r#"{"product_id": 3, "discount_percent": 20}"#).unwrap();
        assert_eq!(params.min_quantity, 1);
        assert_eq!(params.discount_percent.bps(), 2000);
        assert_eq!(params.max_discount_cents, None);
    }

    #[test]
    fn test_legacy_discount_key_is_not_accepted() {
        let result = CouponRule::from_stored(
            "cart-wise",
            r#"{"threshold_cents": 10000, "discount_percentage": 10}"#,
        );
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_record_decodes_into_coupon() {
        let coupon = Coupon::try_from(record(
            "cart-wise",
            r#"{"threshold_cents": 10000, "discount_percent": 10, "max_discount_cents": 1500}"#,
        ))
        .unwrap();

        assert_eq!(coupon.kind(), CouponKind::CartWise);
        match coupon.rule {
            CouponRule::CartWise(params) => {
                assert_eq!(params.threshold().cents(), 10000);
                assert_eq!(params.max_discount(), Some(Money::from_cents(1500)));
            }
            other => panic!("expected cart-wise rule, got {other:?}"),
        }
    }

    #[test]
    fn test_record_with_unknown_kind_is_unsupported() {
        let result = Coupon::try_from(record("mystery", "{}"));
        assert!(matches!(result, Err(CoreError::UnsupportedKind(_))));
    }

    #[test]
    fn test_record_with_malformed_details() {
        let result = Coupon::try_from(record("bxgy", r#"{"buy_products": []}"#));
        assert!(matches!(result, Err(CoreError::MalformedCoupon { id: 7, .. })));
    }

    #[test]
    fn test_coupon_wire_format_flattens_rule() {
        let coupon = Coupon::try_from(record(
            "product-wise",
            r#"{"product_id": 1, "discount_percent": 20}"#,
        ))
        .unwrap();

        let json = serde_json::to_value(&coupon).unwrap();
        assert_eq!(json["type"], "product-wise");
        assert_eq!(json["details"]["product_id"], 1);
        assert_eq!(json["details"]["discount_percent"], 20.0);

        let back: Coupon = serde_json::from_value(json).unwrap();
        assert_eq!(back, coupon);
    }

    #[test]
    fn test_details_json_round_trips_through_storage() {
        let rule = CouponRule::BuyXGetY(BuyXGetYParams {
            buy_products: vec![BxGyProduct { product_id: 1, quantity: 2 }],
            get_products: vec![BxGyProduct { product_id: 2, quantity: 1 }],
            repetition_limit: 3,
        });
        let stored = rule.details_json().unwrap();
        assert_eq!(CouponRule::from_stored("bxgy", &stored).unwrap(), rule);
    }

    #[test]
    fn test_expiry_is_strict() {
        let mut coupon = Coupon::try_from(record(
            "product-wise",
            r#"{"product_id": 1, "discount_percent": 20}"#,
        ))
        .unwrap();
        let deadline = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        coupon.expires_at = Some(deadline);

        assert!(!coupon.is_expired(deadline));
        assert!(coupon.is_expired(deadline + Duration::seconds(1)));
        assert!(coupon.is_live(deadline));

        coupon.is_active = false;
        assert!(!coupon.is_live(deadline));
    }
}
