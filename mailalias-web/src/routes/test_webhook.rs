//! `/api/test-webhook`

use actix_web::{HttpRequest, HttpResponse, web};
use mailalias_app::AppState;
use mailalias_core::services::INCOMING_WEBHOOK_PATH;
use mailalias_core::types::WebhookTestOutcome;
use serde::Deserialize;
use serde_json::json;
use tracing_attributes::instrument;

use crate::error::{ApiError, ResultExt};

/// Externally reachable origin of this server, if configured
#[derive(Debug, Clone, Default)]
pub struct PublicUrl(pub Option<String>);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TriggerBody {
    pub to: Option<String>,
}

pub async fn usage(state: web::Data<AppState>) -> HttpResponse {
    let apex = &state.ctx.apex_domain;
    HttpResponse::Ok().json(json!({
        "message": "Webhook Test Endpoint",
        "usage": "Send a POST request to this endpoint to simulate an incoming email",
        "target": INCOMING_WEBHOOK_PATH,
        "example": {
            "method": "POST",
            "body": { "to": format!("alias@{apex} (optional)") },
        },
        "quick_test": "Or just POST with an empty body {}",
    }))
}

/// 配置的 public_url 优先，否则取请求的 scheme + host
fn origin(req: &HttpRequest, public_url: &PublicUrl) -> String {
    match public_url.0.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => {
            let info = req.connection_info();
            format!("{}://{}", info.scheme(), info.host())
        }
    }
}

#[instrument(skip_all)]
pub async fn trigger(
    req: HttpRequest,
    state: web::Data<AppState>,
    public_url: web::Data<PublicUrl>,
    body: Option<web::Json<TriggerBody>>,
) -> Result<HttpResponse, ApiError> {
    let to = body.and_then(|b| b.into_inner().to);
    let origin = origin(&req, &public_url);

    let outcome = state
        .webhook_test_service
        .send_test(&origin, to)
        .await
        .context("Failed to send test email")?;

    Ok(match outcome {
        WebhookTestOutcome::Delivered { email_id } => HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Test email sent to webhook successfully!",
            "email_id": email_id,
            "note": "Check your inbox at /dashboard/inbox",
        })),
        WebhookTestOutcome::Rejected { status, details } => {
            tracing::warn!(status, "webhook rejected test email");
            HttpResponse::InternalServerError().json(json!({
                "success": false,
                "error": "Webhook returned an error",
                "details": details,
            }))
        }
    })
}
