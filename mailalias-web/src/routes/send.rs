//! `/api/send`

use actix_web::{HttpResponse, web};
use mailalias_app::AppState;
use mailalias_core::types::OutgoingEmail;
use serde::Deserialize;
use serde_json::json;
use tracing_attributes::instrument;

use crate::auth::AuthenticatedAccount;
use crate::error::{ApiError, ResultExt};

/// `to` 可以是单个地址或地址数组
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Default for Recipients {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl Recipients {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(address) => vec![address],
            Self::Many(addresses) => addresses,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendBody {
    pub to: Recipients,
    pub subject: String,
    pub body: String,
    pub html_body: Option<String>,
}

impl From<SendBody> for OutgoingEmail {
    fn from(body: SendBody) -> Self {
        Self {
            to: body.to.into_vec(),
            subject: body.subject,
            body: body.body,
            html_body: body.html_body,
        }
    }
}

#[instrument(skip_all, fields(account = %account.id()))]
pub async fn send_email(
    state: web::Data<AppState>,
    account: AuthenticatedAccount,
    body: web::Json<SendBody>,
) -> Result<HttpResponse, ApiError> {
    let outcome = state
        .send_service
        .send(account.id(), body.into_inner().into())
        .await
        .context("Failed to send email")?;

    let mut response = json!({
        "success": true,
        "relay_response": outcome.relay_response,
    });
    match (outcome.email_id, outcome.warning) {
        (_, Some(warning)) => response["warning"] = json!(warning),
        (Some(email_id), None) => response["email_id"] = json!(email_id),
        (None, None) => {}
    }
    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn to_accepts_string_or_array() {
        let body: SendBody =
            serde_json::from_str(r#"{"to":"a@x.com","subject":"s","body":"b"}"#).unwrap();
        assert_eq!(body.to.into_vec(), vec!["a@x.com"]);

        let body: SendBody =
            serde_json::from_str(r#"{"to":["a@x.com","b@y.org"],"subject":"s","body":"b"}"#)
                .unwrap();
        assert_eq!(body.to.into_vec(), vec!["a@x.com", "b@y.org"]);
    }

    #[test]
    fn missing_fields_become_empty() {
        let body: SendBody = serde_json::from_str("{}").unwrap();
        let email = OutgoingEmail::from(body);
        assert!(email.to.is_empty());
        assert!(email.subject.is_empty());
        assert!(email.html_body.is_none());
    }
}
