//! Router construction.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the application router with request tracing and permissive CORS.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/coupons",
            post(handlers::create_coupon).get(handlers::list_coupons),
        )
        .route(
            "/coupons/{id}",
            get(handlers::get_coupon)
                .put(handlers::update_coupon)
                .delete(handlers::delete_coupon),
        )
        .route("/applicable-coupons", post(handlers::applicable_coupons))
        .route("/apply-coupon/{id}", post(handlers::apply_coupon))
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
