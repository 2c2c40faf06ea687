//! # Repository Module
//!
//! Database repository implementations for the coupon catalog.
//!
//! ```text
//! HTTP handler
//!      │  db.coupons().get_by_id(7)
//!      ▼
//! CouponRepository
//! ├── insert / update / delete
//! ├── get_by_id / get_coupon
//! └── list / list_active / count
//!      │  SQL
//!      ▼
//! SQLite `coupons` table
//! ```
//!
//! ## Available Repositories
//!
//! - [`CouponRepository`](coupon::CouponRepository) - Coupon CRUD and catalog reads

pub mod coupon;
