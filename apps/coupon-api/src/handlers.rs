//! HTTP handlers.
//!
//! Handlers stay thin: validate the input, fetch what the engine needs from
//! storage, call `coupon-core`, shape the response.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use coupon_core::validation::{validate_cart, validate_coupon_name, validate_rule};
use coupon_core::{list_applicable, CoreError, CouponId, CouponRecord};
use coupon_db::{CouponFilter, CouponPatch, NewCoupon};
use tracing::{info, warn};

use crate::dto::{
    ApiJson, ApiPath, ApiQuery, ApplicableCouponsResponse, ApplyCouponResponse, CartRequest,
    CouponResponse, HealthResponse, ListParams, ServiceInfo,
};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// =============================================================================
// Service
// =============================================================================

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Coupon Management System API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Liveness plus database connectivity. 503 while the database is unreachable.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_ok = state.db.health_check().await;
    if !db_ok {
        warn!("Health check failed: database unreachable");
    }

    let (status, label, database) = if db_ok {
        (StatusCode::OK, "healthy", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            timestamp: Utc::now(),
            database: database.to_string(),
        }),
    )
}

// =============================================================================
// Coupon CRUD
// =============================================================================

pub async fn create_coupon(
    State(state): State<AppState>,
    ApiJson(coupon): ApiJson<NewCoupon>,
) -> ApiResult<(StatusCode, Json<CouponResponse>)> {
    validate_coupon_name(&coupon.name)?;
    validate_rule(&coupon.rule)?;

    let record = state.db.coupons().insert(&coupon).await?;
    info!(id = record.id, kind = %record.kind, "Coupon created");

    Ok((StatusCode::CREATED, Json(record.into())))
}

pub async fn list_coupons(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> ApiResult<Json<Vec<CouponResponse>>> {
    let filter = CouponFilter {
        skip: params.skip.unwrap_or(0),
        limit: params.limit.unwrap_or(state.config.default_page_limit),
        active_only: params.active_only.unwrap_or(false),
    };

    let records = state.db.coupons().list(filter).await?;
    Ok(Json(records.into_iter().map(CouponResponse::from).collect()))
}

pub async fn get_coupon(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CouponId>,
) -> ApiResult<Json<CouponResponse>> {
    let record = state
        .db
        .coupons()
        .get_by_id(id)
        .await?
        .ok_or(CoreError::CouponNotFound(id))?;

    Ok(Json(record.into()))
}

pub async fn update_coupon(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CouponId>,
    ApiJson(patch): ApiJson<CouponPatch>,
) -> ApiResult<Json<CouponResponse>> {
    if let Some(name) = &patch.name {
        validate_coupon_name(name)?;
    }

    let record = state.db.coupons().update(id, &patch).await?;
    info!(id, "Coupon updated");

    Ok(Json(record.into()))
}

pub async fn delete_coupon(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CouponId>,
) -> ApiResult<StatusCode> {
    state.db.coupons().delete(id).await?;
    info!(id, "Coupon deleted");

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Cart evaluation
// =============================================================================

/// Every active coupon that discounts the cart, with its discount.
pub async fn applicable_coupons(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CartRequest>,
) -> ApiResult<Json<ApplicableCouponsResponse>> {
    validate_cart(&request.cart)?;

    let coupons = state.db.coupons().list_active().await?;
    let applicable_coupons = list_applicable(&request.cart, &coupons, Utc::now());

    Ok(Json(ApplicableCouponsResponse { applicable_coupons }))
}

/// Applies one coupon and returns the discounted cart.
///
/// The row is handed to the engine undecoded, so an unsupported stored kind
/// surfaces as `UNSUPPORTED_COUPON` rather than a database error.
pub async fn apply_coupon(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CouponId>,
    ApiJson(request): ApiJson<CartRequest>,
) -> ApiResult<Json<ApplyCouponResponse>> {
    validate_cart(&request.cart)?;

    let records: Vec<CouponRecord> = state.db.coupons().get_by_id(id).await?.into_iter().collect();
    let applied = coupon_core::apply_coupon(&request.cart, id, records.as_slice(), Utc::now())
        .map_err(ApiError::from)?;

    info!(id, discount_cents = applied.discount.cents(), "Coupon applied");
    Ok(Json(applied.into()))
}
