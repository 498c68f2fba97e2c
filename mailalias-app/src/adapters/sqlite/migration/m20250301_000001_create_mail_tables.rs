use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // profiles 表
        manager
            .create_table(
                Table::create()
                    .table(Profile::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profile::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profile::Alias).string().not_null().unique_key())
                    .col(ColumnDef::new(Profile::Email).string().not_null())
                    .col(ColumnDef::new(Profile::ForwardTo).string().null())
                    .col(
                        ColumnDef::new(Profile::Role)
                            .string()
                            .not_null()
                            .default("user"),
                    )
                    .col(ColumnDef::new(Profile::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Profile::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // emails 表
        manager
            .create_table(
                Table::create()
                    .table(Email::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Email::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Email::UserId).string().not_null())
                    .col(ColumnDef::new(Email::FromEmail).string().not_null())
                    .col(ColumnDef::new(Email::ToEmail).string().not_null())
                    .col(ColumnDef::new(Email::Subject).string().not_null())
                    .col(ColumnDef::new(Email::Body).text().not_null())
                    .col(ColumnDef::new(Email::HtmlBody).text().null())
                    .col(ColumnDef::new(Email::Type).string().not_null())
                    .col(
                        ColumnDef::new(Email::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Email::SentAt).string().null())
                    .col(ColumnDef::new(Email::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 列表查询按账户 + 时间倒序
        manager
            .create_index(
                Index::create()
                    .name("idx_emails_user_created")
                    .table(Email::Table)
                    .col(Email::UserId)
                    .col(Email::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // sessions 表
        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Session::Token)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Session::UserId).string().not_null())
                    .col(ColumnDef::new(Session::ExpiresAt).string().null())
                    .col(ColumnDef::new(Session::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Session::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Email::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profile::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Profile {
    #[sea_orm(iden = "profiles")]
    Table,
    Id,
    Alias,
    Email,
    ForwardTo,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Email {
    #[sea_orm(iden = "emails")]
    Table,
    Id,
    UserId,
    FromEmail,
    ToEmail,
    Subject,
    Body,
    HtmlBody,
    Type,
    IsRead,
    SentAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Session {
    #[sea_orm(iden = "sessions")]
    Table,
    Token,
    UserId,
    ExpiresAt,
    CreatedAt,
}
