//! Session lookup abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Resolves bearer tokens issued by the external auth system
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Account ID owning `token`, or `None` for unknown/expired tokens
    async fn find_account_id(&self, token: &str) -> CoreResult<Option<String>>;
}
