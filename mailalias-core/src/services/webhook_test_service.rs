//! 入站 webhook 自测
//!
//! 构造一封模拟入站邮件并投递到本服务的 `/api/webhooks/incomingMail`。

use std::sync::Arc;

use chrono::Utc;
use mailalias_provider::create_http_client;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{SyntheticInboundEmail, WebhookTestOutcome};

/// 入站 webhook 路径
pub const INCOMING_WEBHOOK_PATH: &str = "/api/webhooks/incomingMail";

pub struct WebhookTestService {
    ctx: Arc<ServiceContext>,
    /// 复用连接池，超时与 provider 客户端一致
    client: reqwest::Client,
}

impl WebhookTestService {
    pub fn new(ctx: Arc<ServiceContext>) -> CoreResult<Self> {
        let client = create_http_client("webhook")?;
        Ok(Self { ctx, client })
    }

    /// 生成模拟邮件，`to` 缺省为 `alias@<apex_domain>`
    pub fn build_email(&self, to: Option<String>) -> SyntheticInboundEmail {
        let now = Utc::now();
        let sent_at = now.to_rfc3339();
        let apex = &self.ctx.apex_domain;
        SyntheticInboundEmail {
            from: "test@example.com".to_string(),
            to: to
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| format!("alias@{apex}")),
            subject: "Test Email from Webhook Tester".to_string(),
            text: format!(
                "This is a test email sent at {sent_at}\n\nIf you see this in your inbox, your webhook is working correctly!"
            ),
            html: format!(
                "<p>This is a test email sent at {sent_at}</p><p>If you see this in your inbox, your webhook is working correctly!</p>"
            ),
            message_id: format!("test-{}@test.mail.{apex}", now.timestamp_millis()),
        }
    }

    /// 投递到 `<origin>/api/webhooks/incomingMail`
    pub async fn send_test(&self, origin: &str, to: Option<String>) -> CoreResult<WebhookTestOutcome> {
        let email = self.build_email(to);
        let url = format!("{}{INCOMING_WEBHOOK_PATH}", origin.trim_end_matches('/'));
        log::info!("Sending test email {} to {url}", email.message_id);

        let response = self
            .client
            .post(&url)
            .json(&email)
            .send()
            .await
            .map_err(|e| CoreError::WebhookError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::WebhookError(e.to_string()))?;
        let details: serde_json::Value =
            serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));

        if status.is_success() {
            Ok(WebhookTestOutcome::Delivered {
                email_id: details
                    .get("email_id")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            })
        } else {
            log::warn!("Webhook returned HTTP {status}");
            Ok(WebhookTestOutcome::Rejected {
                status: status.as_u16(),
                details,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestContext;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn default_recipient_uses_apex_domain() {
        let t = TestContext::without_dns().await;
        let email = WebhookTestService::new(t.ctx.clone()).unwrap().build_email(None);
        assert_eq!(email.to, "alias@example.com");
        assert_eq!(email.from, "test@example.com");
        assert!(email.message_id.starts_with("test-"));
        assert!(email.message_id.ends_with("@test.mail.example.com"));
    }

    #[tokio::test]
    async fn delivered_returns_email_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INCOMING_WEBHOOK_PATH))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "email_id": "em-1" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let t = TestContext::without_dns().await;
        let outcome = WebhookTestService::new(t.ctx.clone())
            .unwrap()
            .send_test(&server.uri(), Some("jdoe@example.com".into()))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            WebhookTestOutcome::Delivered {
                email_id: Some("em-1".into())
            }
        );

        let requests = server.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(sent["to"], "jdoe@example.com");
        assert_eq!(sent["subject"], "Test Email from Webhook Tester");
        assert!(sent.get("messageId").is_some());
    }

    #[tokio::test]
    async fn rejected_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INCOMING_WEBHOOK_PATH))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "error": "unknown alias" })))
            .mount(&server)
            .await;

        let t = TestContext::without_dns().await;
        let outcome = WebhookTestService::new(t.ctx.clone())
            .unwrap()
            .send_test(&server.uri(), None)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            WebhookTestOutcome::Rejected {
                status: 422,
                details: json!({ "error": "unknown alias" }),
            }
        );
    }

    #[tokio::test]
    async fn one_service_delivers_repeatedly() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INCOMING_WEBHOOK_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .expect(2)
            .mount(&server)
            .await;

        let t = TestContext::without_dns().await;
        let svc = WebhookTestService::new(t.ctx.clone()).unwrap();
        for _ in 0..2 {
            let outcome = svc.send_test(&server.uri(), None).await.unwrap();
            assert_eq!(outcome, WebhookTestOutcome::Delivered { email_id: None });
        }
    }
}
