//! 收件箱服务

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{EmailMessage, EmailPage, EmailQuery};

/// 收件箱服务，所有操作都限定在当前账户
pub struct MailboxService {
    ctx: Arc<ServiceContext>,
}

impl MailboxService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 分页列出邮件，最新的在前
    pub async fn list(&self, account_id: &str, query: &EmailQuery) -> CoreResult<EmailPage> {
        let limit = query.effective_limit();
        let offset = query.effective_offset();
        let repo = &self.ctx.email_repository;

        let emails = repo.list(account_id, query.direction, limit, offset).await?;
        let total = repo.count(account_id, query.direction).await?;

        Ok(EmailPage {
            emails,
            total,
            limit,
            offset,
        })
    }

    /// 设置已读状态
    pub async fn mark_read(
        &self,
        account_id: &str,
        email_id: &str,
        is_read: bool,
    ) -> CoreResult<EmailMessage> {
        self.ctx
            .email_repository
            .set_read(account_id, email_id, is_read)
            .await?
            .ok_or_else(|| CoreError::EmailNotFound(email_id.to_string()))
    }
}
