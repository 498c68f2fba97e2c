//! `/api/forwarding`

use actix_web::{HttpResponse, web};
use mailalias_app::AppState;
use serde::Deserialize;
use serde_json::json;
use tracing_attributes::instrument;

use crate::auth::AuthenticatedAccount;
use crate::error::{ApiError, INTERNAL_ERROR, ResultExt};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForwardingBody {
    /// `null`、缺失或空字符串都表示关闭转发
    pub forward_to: Option<String>,
}

#[instrument(skip_all, fields(account = %account.id()))]
pub async fn get_forwarding(
    state: web::Data<AppState>,
    account: AuthenticatedAccount,
) -> Result<HttpResponse, ApiError> {
    let status = state
        .forwarding_service
        .get(account.id())
        .await
        .context(INTERNAL_ERROR)?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "alias": status.alias,
        "email": status.email,
        "forward_to": status.forward_to,
        "forwarding_enabled": status.forwarding_enabled,
    })))
}

#[instrument(skip_all, fields(account = %account.id()))]
pub async fn update_forwarding(
    state: web::Data<AppState>,
    account: AuthenticatedAccount,
    body: web::Json<ForwardingBody>,
) -> Result<HttpResponse, ApiError> {
    let update = state
        .forwarding_service
        .update(account.id(), body.into_inner().forward_to)
        .await
        .context("Failed to update forwarding")?;

    // DNS 同步失败时仍返回 200，附带警告
    let body = match update.warning() {
        Some(warning) => json!({
            "success": true,
            "warning": warning,
            "details": update.details(),
            "alias": update.alias,
            "email": update.email,
            "forward_to": update.forward_to,
        }),
        None => json!({
            "success": true,
            "message": update.message,
            "alias": update.alias,
            "email": update.email,
            "forward_to": update.forward_to,
        }),
    };
    Ok(HttpResponse::Ok().json(body))
}
