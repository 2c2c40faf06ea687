//! # Coupon API
//!
//! JSON/HTTP front end for the coupon catalog and evaluation engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Coupon API Server                              │
//! │                                                                         │
//! │  Client ───► axum (8000) ───► handlers ───► coupon-core (pure engine)  │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                              coupon-db ───► SQLite                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Endpoints
//! | Method | Path                  | Purpose                              |
//! |--------|-----------------------|--------------------------------------|
//! | GET    | `/`                   | Service banner                       |
//! | GET    | `/health`             | Liveness and database health         |
//! | POST   | `/coupons`            | Create a coupon                      |
//! | GET    | `/coupons`            | List coupons (`skip`, `limit`, `active_only`) |
//! | GET    | `/coupons/{id}`       | Fetch one coupon                     |
//! | PUT    | `/coupons/{id}`       | Partial update                       |
//! | DELETE | `/coupons/{id}`       | Delete                               |
//! | POST   | `/applicable-coupons` | Coupons that discount a cart         |
//! | POST   | `/apply-coupon/{id}`  | Apply one coupon to a cart           |

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_router;
pub use state::AppState;
