//! 业务逻辑服务层

mod forwarding_reconciler;
mod forwarding_service;
mod mailbox_service;
mod send_service;
mod session_service;
mod webhook_test_service;

pub use forwarding_reconciler::{ForwardingReconciler, FORWARD_MARKER};
pub use forwarding_service::ForwardingService;
pub use mailbox_service::MailboxService;
pub use send_service::SendService;
pub use session_service::SessionService;
pub use webhook_test_service::{WebhookTestService, INCOMING_WEBHOOK_PATH};

use std::sync::Arc;

use mailalias_provider::MailRelay;

use crate::error::{CoreError, CoreResult};
use crate::traits::{EmailRepository, ProfileRepository, SessionRepository};
use crate::types::Profile;

/// 未配置时使用的邮件域名
pub const DEFAULT_APEX_DOMAIN: &str = "example.com";

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入平台特定的存储实现和外部服务客户端。
pub struct ServiceContext {
    /// 账户资料仓库
    pub profile_repository: Arc<dyn ProfileRepository>,
    /// 邮件仓库
    pub email_repository: Arc<dyn EmailRepository>,
    /// 会话仓库
    pub session_repository: Arc<dyn SessionRepository>,
    /// DNS 转发记录同步器
    pub reconciler: Arc<ForwardingReconciler>,
    /// 外发中继，未配置 API key 时为 `None`
    pub mail_relay: Option<Arc<dyn MailRelay>>,
    /// 别名所在的邮件域名
    pub apex_domain: String,
}

impl ServiceContext {
    /// 创建服务上下文，DNS 同步默认关闭、无外发中继
    #[must_use]
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository>,
        email_repository: Arc<dyn EmailRepository>,
        session_repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            profile_repository,
            email_repository,
            session_repository,
            reconciler: Arc::new(ForwardingReconciler::disabled()),
            mail_relay: None,
            apex_domain: DEFAULT_APEX_DOMAIN.to_string(),
        }
    }

    #[must_use]
    pub fn with_reconciler(mut self, reconciler: ForwardingReconciler) -> Self {
        self.reconciler = Arc::new(reconciler);
        self
    }

    #[must_use]
    pub fn with_mail_relay(mut self, relay: Option<Arc<dyn MailRelay>>) -> Self {
        self.mail_relay = relay;
        self
    }

    #[must_use]
    pub fn with_apex_domain(mut self, apex_domain: impl Into<String>) -> Self {
        self.apex_domain = apex_domain.into();
        self
    }

    /// 读取账户资料，不存在时返回 `AccountNotFound`
    pub async fn require_profile(&self, account_id: &str) -> CoreResult<Profile> {
        self.profile_repository
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))
    }
}
