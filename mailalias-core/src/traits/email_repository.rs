//! Email persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{EmailDirection, EmailMessage};

/// Email repository Trait
///
/// Every method is scoped by `user_id`; rows of other accounts are never
/// returned or modified.
#[async_trait]
pub trait EmailRepository: Send + Sync {
    /// Page of messages, newest first
    async fn list(
        &self,
        user_id: &str,
        direction: Option<EmailDirection>,
        limit: u64,
        offset: u64,
    ) -> CoreResult<Vec<EmailMessage>>;

    /// Number of messages matching the same filter as `list`
    async fn count(&self, user_id: &str, direction: Option<EmailDirection>) -> CoreResult<u64>;

    /// Store a message
    async fn insert(&self, email: &EmailMessage) -> CoreResult<()>;

    /// Set the read flag, returning the updated message or `None` when the
    /// message does not exist for this user
    async fn set_read(
        &self,
        user_id: &str,
        email_id: &str,
        is_read: bool,
    ) -> CoreResult<Option<EmailMessage>>;
}
