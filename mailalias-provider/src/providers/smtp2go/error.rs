//! SMTP2GO 错误映射
//!
//! SMTP2GO 的错误码不稳定，这里按 HTTP 状态码映射，`raw.code` 存状态码。

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::Smtp2goRelay;

impl ProviderErrorMapper for Smtp2goRelay {
    fn provider_name(&self) -> &'static str {
        "smtp2go"
    }

    fn map_error(&self, raw: RawApiError, _context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            Some("401") => ProviderError::InvalidCredentials {
                provider,
                raw_message: Some(raw.message),
            },
            Some("403") => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },
            Some("400" | "422") => ProviderError::InvalidParameter {
                provider,
                param: "email".to_string(),
                detail: raw.message,
            },
            Some("429") => ProviderError::RateLimited {
                provider,
                retry_after: None,
                raw_message: Some(raw.message),
            },
            _ => self.unknown_error(raw),
        }
    }
}
