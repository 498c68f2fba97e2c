//! Bearer token 认证

use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use mailalias_app::AppState;
use mailalias_core::error::CoreError;

use crate::error::ApiError;

/// Account resolved from the `Authorization: Bearer <token>` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAccount(pub String);

impl AuthenticatedAccount {
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// 提取 bearer token，scheme 不区分大小写
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

impl FromRequest for AuthenticatedAccount {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                CoreError::ConfigurationError("application state is not registered".to_string())
            })?;
            let account_id = state
                .session_service
                .authenticate(token.as_deref())
                .await?;
            Ok(Self(account_id))
        })
    }
}
