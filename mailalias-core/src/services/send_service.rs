//! 外发邮件服务

use std::sync::Arc;

use chrono::Utc;
use mailalias_provider::RelayEmail;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{EmailDirection, EmailMessage, OutgoingEmail, SendOutcome};
use crate::utils::validation::is_valid_email;

/// 外发邮件服务
///
/// 先经中继发出，再写入发件记录；写入失败时邮件已发出，只返回警告。
pub struct SendService {
    ctx: Arc<ServiceContext>,
}

impl SendService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn send(&self, account_id: &str, email: OutgoingEmail) -> CoreResult<SendOutcome> {
        let profile = self.ctx.require_profile(account_id).await?;

        if email.to.is_empty() || email.subject.is_empty() || email.body.is_empty() {
            return Err(CoreError::ValidationError(
                "Missing required fields: to, subject, or body".to_string(),
            ));
        }
        if let Some(bad) = email.to.iter().find(|addr| !is_valid_email(addr)) {
            return Err(CoreError::ValidationError(format!(
                "Invalid recipient address: {bad}"
            )));
        }

        let relay = self.ctx.mail_relay.as_ref().ok_or_else(|| {
            CoreError::ConfigurationError("SMTP2GO_API_KEY is not configured".to_string())
        })?;

        let receipt = relay
            .send(&RelayEmail {
                to: email.to.clone(),
                sender: profile.email.clone(),
                subject: email.subject.clone(),
                text_body: Some(email.body.clone()),
                html_body: email.html_body.clone(),
            })
            .await?;

        let now = Utc::now();
        let html_body = email
            .html_body
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| email.body.replace('\n', "<br>"));
        let record = EmailMessage {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: account_id.to_string(),
            from_email: profile.email,
            to_email: email.to.join(", "),
            subject: email.subject,
            body: email.body,
            html_body: Some(html_body),
            direction: EmailDirection::Outgoing,
            is_read: true,
            sent_at: Some(now),
            created_at: now,
        };

        match self.ctx.email_repository.insert(&record).await {
            Ok(()) => Ok(SendOutcome {
                email_id: Some(record.id),
                relay_response: receipt,
                warning: None,
            }),
            Err(e) => {
                log::error!("Email {} sent but not stored: {e}", record.id);
                Ok(SendOutcome {
                    email_id: None,
                    relay_response: receipt,
                    warning: Some(SendOutcome::NOT_STORED_WARNING),
                })
            }
        }
    }
}
