//! HTTP error mapping

use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, error::JsonPayloadError};
use mailalias_core::error::{CoreError, CoreResult};
use serde_json::json;

/// Generic 500 message when a route gives no better one
pub const INTERNAL_ERROR: &str = "Internal server error";

/// `CoreError` plus the route-level message used for 5xx bodies
#[derive(Debug)]
pub struct ApiError {
    context: &'static str,
    source: CoreError,
}

impl ApiError {
    pub fn new(context: &'static str, source: CoreError) -> Self {
        Self { context, source }
    }

    pub fn source(&self) -> &CoreError {
        &self.source
    }
}

impl From<CoreError> for ApiError {
    fn from(source: CoreError) -> Self {
        Self::new(INTERNAL_ERROR, source)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

/// 给 `CoreResult` 附加路由级错误消息
pub trait ResultExt<T> {
    fn context(self, context: &'static str) -> Result<T, ApiError>;
}

impl<T> ResultExt<T> for CoreResult<T> {
    fn context(self, context: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(context, e))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.source {
            CoreError::AccountNotFound(_) | CoreError::EmailNotFound(_) => StatusCode::NOT_FOUND,
            CoreError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.source.is_expected() {
            tracing::warn!(error = %self, "request rejected");
        } else {
            tracing::error!(error = %self, "request failed");
        }

        let body = match &self.source {
            CoreError::AccountNotFound(_) => json!({ "error": "Profile not found" }),
            CoreError::EmailNotFound(_) => json!({ "error": "Email not found" }),
            CoreError::ValidationError(message) => json!({ "error": message }),
            CoreError::Unauthorized => json!({ "error": "Unauthorized" }),
            other => json!({ "error": self.context, "details": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// JSON 请求体无法解析时返回 400
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let details = err.to_string();
    let response =
        HttpResponse::BadRequest().json(json!({ "error": "Invalid request body", "details": details }));
    actix_web::error::InternalError::from_response(err, response).into()
}
