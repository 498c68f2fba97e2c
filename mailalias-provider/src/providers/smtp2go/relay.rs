//! SMTP2GO MailRelay trait 实现

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::Result;
use crate::http_client::{HttpUtils, RawResponse};
use crate::traits::{ErrorContext, MailRelay, ProviderErrorMapper, RawApiError};
use crate::types::{RelayEmail, RelayReceipt};

use super::types::{ErrorBody, SendPayload, SendResponse, derive_bodies};
use super::{SEND_PATH, Smtp2goRelay};

impl Smtp2goRelay {
    /// 依次取 `message`、`data.error`，都没有时退回 HTTP 状态描述
    fn error_message(response: &RawResponse) -> String {
        let body: ErrorBody = serde_json::from_str(&response.body).unwrap_or_default();
        body.message
            .or_else(|| body.data.and_then(|d| d.error))
            .unwrap_or_else(|| {
                StatusCode::from_u16(response.status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown error")
                    .to_string()
            })
    }
}

#[async_trait]
impl MailRelay for Smtp2goRelay {
    fn id(&self) -> &'static str {
        "smtp2go"
    }

    async fn send(&self, email: &RelayEmail) -> Result<RelayReceipt> {
        let (text_body, html_body) =
            derive_bodies(email.text_body.as_deref(), email.html_body.as_deref());
        let payload = SendPayload {
            api_key: &self.api_key,
            to: &email.to,
            sender: &email.sender,
            subject: &email.subject,
            text_body,
            html_body,
        };

        let url = format!("{}{SEND_PATH}", self.base_url);
        let request = self.client.post(&url).json(&payload);
        let response =
            HttpUtils::execute_request(request, self.provider_name(), "POST", SEND_PATH).await?;

        if !response.is_success() {
            let message = Self::error_message(&response);
            log::error!(
                "[smtp2go] 发送失败 (HTTP {}): {message}",
                response.status
            );
            let raw = RawApiError::with_code(response.status.to_string(), message);
            return Err(self.map_error(raw, ErrorContext::default()));
        }

        let parsed: SendResponse = HttpUtils::parse_json(&response.body, self.provider_name())?;
        if parsed.data.failed > 0 {
            log::warn!(
                "[smtp2go] {} 个收件人被拒绝: {} ({})",
                parsed.data.failed,
                parsed.data.error.as_deref().unwrap_or("-"),
                parsed.data.error_code.as_deref().unwrap_or("-")
            );
        }
        log::info!(
            "[smtp2go] 已发送 {} 封, request_id={}",
            parsed.data.succeeded,
            parsed.request_id.as_deref().unwrap_or("-")
        );

        Ok(RelayReceipt {
            request_id: parsed.request_id,
            succeeded: parsed.data.succeeded,
            failed: parsed.data.failed,
            email_id: parsed.data.email_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            retry_after: None,
            body: body.to_string(),
        }
    }

    #[test]
    fn error_message_prefers_message_field() {
        let msg = Smtp2goRelay::error_message(&response(
            400,
            r#"{"data":{"error":"Invalid sender"},"message":"outer"}"#,
        ));
        assert_eq!(msg, "outer");
    }

    #[test]
    fn error_message_falls_back_to_data_error() {
        let msg = Smtp2goRelay::error_message(&response(
            400,
            r#"{"data":{"error":"Invalid sender","error_code":"E_ApiResponseCodes.ENDPOINT_PERMISSION_DENIED"}}"#,
        ));
        assert_eq!(msg, "Invalid sender");
    }

    #[test]
    fn error_message_uses_message_field() {
        let msg = Smtp2goRelay::error_message(&response(401, r#"{"message":"Unauthorized key"}"#));
        assert_eq!(msg, "Unauthorized key");
    }

    #[test]
    fn error_message_falls_back_to_status_text() {
        let msg = Smtp2goRelay::error_message(&response(502, "<html>bad gateway</html>"));
        assert_eq!(msg, "Bad Gateway");
    }
}
