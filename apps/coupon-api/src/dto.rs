//! Request and response bodies.
//!
//! Coupon bodies reuse the core types where the wire shape already matches
//! (`NewCoupon`, `CouponPatch`, `Cart`, `ApplicableCoupon`, `Coupon`). The
//! extractors here wrap axum's so that a rejected body, path or query comes
//! back as an [`ApiError`] instead of axum's plain-text rejection.

use axum::extract::{FromRequest, FromRequestParts};
use chrono::{DateTime, Utc};
use coupon_core::{ApplicableCoupon, AppliedCoupon, Cart, Coupon, CouponId, CouponRecord};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;

// =============================================================================
// Extractors
// =============================================================================

/// JSON body extractor with [`ApiError`] rejections.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path extractor with [`ApiError`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Query-string extractor with [`ApiError`] rejections.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

// =============================================================================
// Coupons
// =============================================================================

/// A stored coupon as returned by the CRUD endpoints.
///
/// Built from the raw row rather than the decoded [`Coupon`], so a row with
/// an unsupported kind can still be read back and managed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponResponse {
    pub id: CouponId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub details: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<CouponRecord> for CouponResponse {
    fn from(record: CouponRecord) -> Self {
        let details = serde_json::from_str(&record.details).unwrap_or_else(|e| {
            warn!(id = record.id, error = %e, "Stored coupon details are not valid JSON");
            serde_json::Value::String(record.details.clone())
        });

        CouponResponse {
            id: record.id,
            name: record.name,
            kind: record.kind,
            details,
            is_active: record.is_active,
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }
}

/// Query parameters of `GET /coupons`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub active_only: Option<bool>,
}

// =============================================================================
// Cart evaluation
// =============================================================================

/// Body of both cart endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartRequest {
    pub cart: Cart,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicableCouponsResponse {
    pub applicable_coupons: Vec<ApplicableCoupon>,
}

/// Body of a successful `POST /apply-coupon/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyCouponResponse {
    pub updated_cart: Cart,
    pub total_price_cents: i64,
    pub total_discount_cents: i64,
    pub final_price_cents: i64,
    pub applied_coupon: Coupon,
}

impl From<AppliedCoupon> for ApplyCouponResponse {
    fn from(applied: AppliedCoupon) -> Self {
        let totals = applied.totals();
        ApplyCouponResponse {
            updated_cart: applied.cart,
            total_price_cents: totals.total_price_cents,
            total_discount_cents: totals.total_discount_cents,
            final_price_cents: totals.final_price_cents,
            applied_coupon: applied.coupon,
        }
    }
}

// =============================================================================
// Service
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(details: &str) -> CouponRecord {
        CouponRecord {
            id: 3,
            name: "Legacy".to_string(),
            kind: "flat-fee".to_string(),
            details: details.to_string(),
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            expires_at: None,
        }
    }

    #[test]
    fn test_coupon_response_keeps_unknown_kind() {
        let response = CouponResponse::from(record(r#"{"amount_cents": 500}"#));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["type"], "flat-fee");
        assert_eq!(json["details"]["amount_cents"], 500);
    }

    #[test]
    fn test_coupon_response_falls_back_to_raw_details() {
        let response = CouponResponse::from(record("not json"));
        assert_eq!(response.details, serde_json::Value::String("not json".to_string()));
    }
}
