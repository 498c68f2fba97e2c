//! 会话解析服务

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;

/// 把 bearer token 解析为账户 ID
pub struct SessionService {
    ctx: Arc<ServiceContext>,
}

impl SessionService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 缺失或未知 token 返回 `Unauthorized`
    pub async fn authenticate(&self, token: Option<&str>) -> CoreResult<String> {
        let token = token.map(str::trim).filter(|t| !t.is_empty());
        let Some(token) = token else {
            return Err(CoreError::Unauthorized);
        };
        self.ctx
            .session_repository
            .find_account_id(token)
            .await?
            .ok_or(CoreError::Unauthorized)
    }
}
