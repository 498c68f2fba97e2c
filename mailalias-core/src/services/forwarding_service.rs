//! 邮件转发设置服务

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{ForwardingStatus, ForwardingUpdate, ReconcileResult};
use crate::utils::validation::{is_valid_email, non_empty};

/// 邮件转发设置服务
///
/// 转发目标先写入资料表，再同步 DNS；DNS 同步失败只作为警告返回。
pub struct ForwardingService {
    ctx: Arc<ServiceContext>,
}

impl ForwardingService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 当前转发设置
    pub async fn get(&self, account_id: &str) -> CoreResult<ForwardingStatus> {
        let profile = self.ctx.require_profile(account_id).await?;
        Ok(ForwardingStatus {
            forwarding_enabled: profile.forward_to.is_some(),
            alias: profile.alias,
            email: profile.email,
            forward_to: profile.forward_to,
        })
    }

    /// 更新转发目标，`None` 或空字符串表示关闭
    pub async fn update(
        &self,
        account_id: &str,
        forward_to: Option<String>,
    ) -> CoreResult<ForwardingUpdate> {
        let forward_to = non_empty(forward_to);
        if let Some(target) = &forward_to {
            if !is_valid_email(target) {
                return Err(CoreError::ValidationError("Invalid email address".to_string()));
            }
        }

        let profile = self.ctx.require_profile(account_id).await?;

        // 存储失败时不再同步 DNS
        self.ctx
            .profile_repository
            .update_forward_to(account_id, forward_to.as_deref())
            .await?;

        let dns = self
            .ctx
            .reconciler
            .apply(&profile.alias, forward_to.as_deref())
            .await;
        if let ReconcileResult::Failed(err) = &dns {
            log::warn!("Forwarding for {account_id} saved, DNS not updated: {err}");
        }

        let message = match &forward_to {
            Some(target) => format!("Forwarding enabled: {} → {target}", profile.email),
            None => "Forwarding disabled".to_string(),
        };

        Ok(ForwardingUpdate {
            alias: profile.alias,
            email: profile.email,
            forward_to,
            message,
            dns,
        })
    }
}
