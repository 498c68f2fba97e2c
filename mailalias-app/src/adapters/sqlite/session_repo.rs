//! `SessionRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue::Set, EntityTrait};

use mailalias_core::error::{CoreError, CoreResult};
use mailalias_core::traits::SessionRepository;

use super::entity::session;
use super::{SqliteStore, format_timestamp, parse_timestamp};

impl SqliteStore {
    /// Register a session token for `user_id`.
    ///
    /// Sessions normally come from the external auth system sharing this
    /// database; this is used for seeding and tests.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if the insert fails.
    pub async fn insert_session(
        &self,
        token: &str,
        user_id: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> CoreResult<()> {
        let model = session::ActiveModel {
            token: Set(token.to_string()),
            user_id: Set(user_id.to_string()),
            expires_at: Set(expires_at.as_ref().map(format_timestamp)),
            created_at: Set(format_timestamp(&Utc::now())),
        };
        session::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to insert session: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for SqliteStore {
    async fn find_account_id(&self, token: &str) -> CoreResult<Option<String>> {
        let row = session::Entity::find_by_id(token)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query session: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };

        if let Some(expires_at) = row.expires_at.as_deref() {
            if parse_timestamp("expires_at", expires_at)? <= Utc::now() {
                log::debug!("会话已过期: {}", row.user_id);
                return Ok(None);
            }
        }
        Ok(Some(row.user_id))
    }
}
