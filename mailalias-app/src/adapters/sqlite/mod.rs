//! SQLite-based unified store using `SeaORM`.
//!
//! A single `SqliteStore` implements `ProfileRepository`, `EmailRepository`
//! and `SessionRepository`, backed by one `SQLite` database.

mod email_repo;
pub(crate) mod entity;
mod migration;
mod profile_repo;
mod session_repo;

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use mailalias_core::error::{CoreError, CoreResult};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use migration::Migrator;

/// SQLite-based store shared by all repositories.
pub struct SqliteStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (or create) the database file at `db_path`.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn new(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        Self::connect(&format!("sqlite://{}?mode=rwc", db_path.display())).await
    }

    /// Connect with a full database URL, e.g. `sqlite::memory:`.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if connection or migration fails.
    pub async fn connect(db_url: &str) -> CoreResult<Self> {
        let db = Database::connect(db_url)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to SQLite: {e}")))?;

        let store = Self { db };

        // Ensure schema is up to date before the store is used.
        Migrator::up(&store.db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))?;

        log::info!("SQLite store ready");
        Ok(store)
    }
}

/// 固定精度的 UTC 时间串，保证按字符串排序即按时间排序
pub(crate) fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(field: &str, value: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CoreError::SerializationError(format!("Invalid {field}: {e}")))
}
