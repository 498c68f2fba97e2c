//! `EmailRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use mailalias_core::error::{CoreError, CoreResult};
use mailalias_core::traits::EmailRepository;
use mailalias_core::types::{EmailDirection, EmailMessage};

use super::entity::email;
use super::{SqliteStore, format_timestamp, parse_timestamp};

impl email::Model {
    /// Convert a `SeaORM` row model into a domain `EmailMessage`.
    fn into_email(self) -> CoreResult<EmailMessage> {
        let direction = EmailDirection::parse(&self.direction).ok_or_else(|| {
            CoreError::SerializationError(format!("Invalid type: {}", self.direction))
        })?;
        let sent_at = self
            .sent_at
            .as_deref()
            .map(|s| parse_timestamp("sent_at", s))
            .transpose()?;

        Ok(EmailMessage {
            created_at: parse_timestamp("created_at", &self.created_at)?,
            sent_at,
            direction,
            id: self.id,
            user_id: self.user_id,
            from_email: self.from_email,
            to_email: self.to_email,
            subject: self.subject,
            body: self.body,
            html_body: self.html_body,
            is_read: self.is_read,
        })
    }
}

fn email_to_active_model(message: &EmailMessage) -> email::ActiveModel {
    email::ActiveModel {
        id: Set(message.id.clone()),
        user_id: Set(message.user_id.clone()),
        from_email: Set(message.from_email.clone()),
        to_email: Set(message.to_email.clone()),
        subject: Set(message.subject.clone()),
        body: Set(message.body.clone()),
        html_body: Set(message.html_body.clone()),
        direction: Set(message.direction.as_str().to_string()),
        is_read: Set(message.is_read),
        sent_at: Set(message.sent_at.as_ref().map(format_timestamp)),
        created_at: Set(format_timestamp(&message.created_at)),
    }
}

/// 账户范围 + 可选方向过滤
fn scoped(user_id: &str, direction: Option<EmailDirection>) -> Select<email::Entity> {
    let query = email::Entity::find().filter(email::Column::UserId.eq(user_id));
    match direction {
        Some(direction) => query.filter(email::Column::Direction.eq(direction.as_str())),
        None => query,
    }
}

#[async_trait]
impl EmailRepository for SqliteStore {
    async fn list(
        &self,
        user_id: &str,
        direction: Option<EmailDirection>,
        limit: u64,
        offset: u64,
    ) -> CoreResult<Vec<EmailMessage>> {
        let rows = scoped(user_id, direction)
            .order_by_desc(email::Column::CreatedAt)
            .order_by_desc(email::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query emails: {e}")))?;

        rows.into_iter().map(email::Model::into_email).collect()
    }

    async fn count(&self, user_id: &str, direction: Option<EmailDirection>) -> CoreResult<u64> {
        scoped(user_id, direction)
            .count(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to count emails: {e}")))
    }

    async fn insert(&self, message: &EmailMessage) -> CoreResult<()> {
        email::Entity::insert(email_to_active_model(message))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to insert email: {e}")))?;

        Ok(())
    }

    async fn set_read(
        &self,
        user_id: &str,
        email_id: &str,
        is_read: bool,
    ) -> CoreResult<Option<EmailMessage>> {
        let result = email::Entity::update_many()
            .col_expr(email::Column::IsRead, Expr::value(is_read))
            .filter(email::Column::Id.eq(email_id))
            .filter(email::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to update email: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let row = scoped(user_id, None)
            .filter(email::Column::Id.eq(email_id))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query email: {e}")))?;

        row.map(email::Model::into_email).transpose()
    }
}
