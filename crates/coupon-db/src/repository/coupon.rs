//! # Coupon Repository
//!
//! Database operations for coupon definitions.
//!
//! Rows come back as [`CouponRecord`]: kind and details exactly as stored.
//! Decoding into a typed [`Coupon`] is left to `coupon-core`, so a row with
//! an unknown kind can still be listed, updated and deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use coupon_core::{Coupon, CouponId, CouponRecord, CouponRule};

const COUPON_COLUMNS: &str = "id, name, kind, details, is_active, created_at, expires_at";

/// A coupon definition to insert. Storage assigns the id and `created_at`;
/// new coupons start active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCoupon {
    pub name: String,
    #[serde(flatten)]
    pub rule: CouponRule,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial update: `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouponPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Paging and filtering for [`CouponRepository::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CouponFilter {
    pub skip: u32,
    pub limit: u32,
    pub active_only: bool,
}

impl Default for CouponFilter {
    fn default() -> Self {
        CouponFilter {
            skip: 0,
            limit: 100,
            active_only: false,
        }
    }
}

/// Repository for coupon database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CouponRepository::new(pool);
///
/// let record = repo.insert(&new_coupon).await?;
/// let live = repo.list_active().await?;
/// ```
#[derive(Debug, Clone)]
pub struct CouponRepository {
    pool: SqlitePool,
}

impl CouponRepository {
    /// Creates a new CouponRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CouponRepository { pool }
    }

    /// Inserts a new coupon and returns the stored row.
    pub async fn insert(&self, coupon: &NewCoupon) -> DbResult<CouponRecord> {
        debug!(name = %coupon.name, kind = %coupon.rule.kind(), "Inserting coupon");

        let details = coupon.rule.details_json()?;
        let now = Utc::now();

        let record = sqlx::query_as::<_, CouponRecord>(&format!(
            r#"
            INSERT INTO coupons (name, kind, details, is_active, created_at, expires_at)
            VALUES (?1, ?2, ?3, 1, ?4, ?5)
            RETURNING {COUPON_COLUMNS}
            "#
        ))
        .bind(&coupon.name)
        .bind(coupon.rule.kind().as_str())
        .bind(details)
        .bind(now)
        .bind(coupon.expires_at)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = record.id, "Coupon inserted");
        Ok(record)
    }

    /// Gets a coupon row by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(CouponRecord))` - Coupon found
    /// * `Ok(None)` - Coupon not found
    pub async fn get_by_id(&self, id: CouponId) -> DbResult<Option<CouponRecord>> {
        let record = sqlx::query_as::<_, CouponRecord>(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Gets a coupon by ID and decodes it.
    ///
    /// ## Errors
    /// * `DbError::Core` - The stored kind or details cannot be decoded
    pub async fn get_coupon(&self, id: CouponId) -> DbResult<Option<Coupon>> {
        match self.get_by_id(id).await? {
            Some(record) => Ok(Some(Coupon::try_from(record)?)),
            None => Ok(None),
        }
    }

    /// Lists coupon rows in id order.
    pub async fn list(&self, filter: CouponFilter) -> DbResult<Vec<CouponRecord>> {
        debug!(
            skip = filter.skip,
            limit = filter.limit,
            active_only = filter.active_only,
            "Listing coupons"
        );

        let records = sqlx::query_as::<_, CouponRecord>(&format!(
            r#"
            SELECT {COUPON_COLUMNS}
            FROM coupons
            WHERE (?1 = 0 OR is_active = 1)
            ORDER BY id
            LIMIT ?2 OFFSET ?3
            "#
        ))
        .bind(filter.active_only)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Every active coupon, decoded, in id order.
    ///
    /// Rows that fail to decode are skipped with a warning so one bad row
    /// doesn't hide the rest of the catalog. Expiry is not filtered here;
    /// the engine checks it against the evaluation instant.
    pub async fn list_active(&self) -> DbResult<Vec<Coupon>> {
        let records = sqlx::query_as::<_, CouponRecord>(&format!(
            "SELECT {COUPON_COLUMNS} FROM coupons WHERE is_active = 1 ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        let coupons = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id;
                match Coupon::try_from(record) {
                    Ok(coupon) => Some(coupon),
                    Err(e) => {
                        warn!(id, error = %e, "Skipping undecodable coupon");
                        None
                    }
                }
            })
            .collect();

        Ok(coupons)
    }

    /// Applies a partial update and returns the updated row.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Coupon doesn't exist
    pub async fn update(&self, id: CouponId, patch: &CouponPatch) -> DbResult<CouponRecord> {
        debug!(id, "Updating coupon");

        let record = sqlx::query_as::<_, CouponRecord>(&format!(
            r#"
            UPDATE coupons SET
                name = COALESCE(?2, name),
                is_active = COALESCE(?3, is_active),
                expires_at = COALESCE(?4, expires_at)
            WHERE id = ?1
            RETURNING {COUPON_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.is_active)
        .bind(patch.expires_at)
        .fetch_optional(&self.pool)
        .await?;

        record.ok_or_else(|| DbError::not_found("Coupon", id))
    }

    /// Deletes a coupon.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Coupon doesn't exist
    pub async fn delete(&self, id: CouponId) -> DbResult<()> {
        debug!(id, "Deleting coupon");

        let result = sqlx::query("DELETE FROM coupons WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", id));
        }

        Ok(())
    }

    /// Counts all coupons.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coupons")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
