//! SQLite pool setup.
//!
//! One `Database` is opened at startup and shared by every request handler.
//! The journal runs in WAL mode, so catalog reads during cart evaluation
//! don't wait on coupon writes.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::coupon::CouponRepository;

/// Where the coupon store lives and how many connections it may hold.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
    /// How long a handler waits for a free connection.
    pub acquire_timeout: Duration,
    /// Apply pending migrations when the pool opens.
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed store; the file is created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// A private in-memory store, empty on every call.
    ///
    /// Each SQLite connection to `:memory:` sees its own database, so the
    /// pool is pinned to a single connection.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }
}

/// Shared handle to the coupon store. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, brings the schema up to date.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening coupon store");

        let url = format!("sqlite://{}?mode=rwc", config.database_path.display());
        let connect_options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }

        info!(max_connections = config.max_connections, "Coupon store ready");
        Ok(db)
    }

    /// Applies pending migrations; already-applied ones are skipped.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Raw pool access, for queries no repository method covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn coupons(&self) -> CouponRepository {
        CouponRepository::new(self.pool.clone())
    }

    pub async fn close(&self) {
        info!("Closing coupon store");
        self.pool.close().await;
    }

    /// True while the store answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        assert_eq!(db.coupons().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_closed_database_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_schema_waits_for_explicit_migration() {
        let db = Database::new(DbConfig::in_memory().run_migrations(false))
            .await
            .unwrap();
        assert!(db.coupons().count().await.is_err());

        db.run_migrations().await.unwrap();
        assert_eq!(db.coupons().count().await.unwrap(), 0);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/coupons.db").max_connections(10);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(30));
        assert!(config.run_migrations);
    }
}
