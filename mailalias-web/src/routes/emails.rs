//! `/api/emails`

use actix_web::{HttpResponse, web};
use mailalias_app::AppState;
use mailalias_core::error::CoreError;
use mailalias_core::types::EmailQuery;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing_attributes::instrument;

use crate::auth::AuthenticatedAccount;
use crate::error::{ApiError, ResultExt};

const MISSING_FIELDS: &str = "Missing required fields: id and is_read (boolean)";

/// 查询串参数；非数字的 limit/offset 按缺省处理
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListParams {
    fn into_query(self) -> EmailQuery {
        let number = |v: Option<String>| v.and_then(|s| s.trim().parse::<u64>().ok());
        EmailQuery::from_params(
            self.kind.as_deref(),
            number(self.limit),
            number(self.offset),
        )
    }
}

#[instrument(skip_all, fields(account = %account.id()))]
pub async fn list_emails(
    state: web::Data<AppState>,
    account: AuthenticatedAccount,
    params: web::Query<ListParams>,
) -> Result<HttpResponse, ApiError> {
    let query = params.into_inner().into_query();
    let page = state
        .mailbox_service
        .list(account.id(), &query)
        .await
        .context("Failed to fetch emails")?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "emails": page.emails,
        "total": page.total,
        "limit": page.limit,
        "offset": page.offset,
    })))
}

#[instrument(skip_all, fields(account = %account.id()))]
pub async fn mark_email(
    state: web::Data<AppState>,
    account: AuthenticatedAccount,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let id = body.get("id").and_then(Value::as_str).filter(|s| !s.is_empty());
    let is_read = body.get("is_read").and_then(Value::as_bool);
    let (Some(id), Some(is_read)) = (id, is_read) else {
        return Err(CoreError::ValidationError(MISSING_FIELDS.to_string()).into());
    };

    let email = state
        .mailbox_service
        .mark_read(account.id(), id, is_read)
        .await
        .context("Failed to update email")?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "email": email })))
}
