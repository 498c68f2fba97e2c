//! Profile persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Profile;

/// Profile repository Trait
///
/// Platform implementation:
/// - Actix-Web: `SqliteStore` (`SeaORM`)
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Get profile by account ID
    async fn find_by_id(&self, account_id: &str) -> CoreResult<Option<Profile>>;

    /// Insert or replace a profile
    async fn save(&self, profile: &Profile) -> CoreResult<()>;

    /// Atomically set the forwarding target of one account
    ///
    /// # Arguments
    /// * `account_id` - Account ID
    /// * `forward_to` - new target, `None` disables forwarding
    async fn update_forward_to(&self, account_id: &str, forward_to: Option<&str>)
        -> CoreResult<()>;
}
