//! `ProfileRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};

use mailalias_core::error::{CoreError, CoreResult};
use mailalias_core::traits::ProfileRepository;
use mailalias_core::types::{Profile, Role};

use super::entity::profile;
use super::{SqliteStore, format_timestamp, parse_timestamp};

impl profile::Model {
    /// Convert a `SeaORM` row model into a domain `Profile`.
    fn into_profile(self) -> CoreResult<Profile> {
        Ok(Profile {
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
            role: Role::parse(&self.role),
            id: self.id,
            alias: self.alias,
            email: self.email,
            forward_to: self.forward_to,
        })
    }
}

fn profile_to_active_model(profile: &Profile) -> profile::ActiveModel {
    profile::ActiveModel {
        id: Set(profile.id.clone()),
        alias: Set(profile.alias.clone()),
        email: Set(profile.email.clone()),
        forward_to: Set(profile.forward_to.clone()),
        role: Set(profile.role.as_str().to_string()),
        created_at: Set(format_timestamp(&profile.created_at)),
        updated_at: Set(format_timestamp(&profile.updated_at)),
    }
}

#[async_trait]
impl ProfileRepository for SqliteStore {
    async fn find_by_id(&self, account_id: &str) -> CoreResult<Option<Profile>> {
        let row = profile::Entity::find_by_id(account_id)
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query profile: {e}")))?;

        row.map(profile::Model::into_profile).transpose()
    }

    async fn save(&self, profile: &Profile) -> CoreResult<()> {
        profile::Entity::insert(profile_to_active_model(profile))
            .on_conflict(
                OnConflict::column(profile::Column::Id)
                    .update_columns([
                        profile::Column::Alias,
                        profile::Column::Email,
                        profile::Column::ForwardTo,
                        profile::Column::Role,
                        profile::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save profile: {e}")))?;

        Ok(())
    }

    async fn update_forward_to(
        &self,
        account_id: &str,
        forward_to: Option<&str>,
    ) -> CoreResult<()> {
        // 单条 UPDATE，只动转发目标和更新时间
        let result = profile::Entity::update_many()
            .col_expr(
                profile::Column::ForwardTo,
                Expr::value(forward_to.map(str::to_string)),
            )
            .col_expr(
                profile::Column::UpdatedAt,
                Expr::value(format_timestamp(&chrono::Utc::now())),
            )
            .filter(profile::Column::Id.eq(account_id))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to update forward_to: {e}")))?;

        if result.rows_affected == 0 {
            return Err(CoreError::AccountNotFound(account_id.to_string()));
        }
        Ok(())
    }
}
