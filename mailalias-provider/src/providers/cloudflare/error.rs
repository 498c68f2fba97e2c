//! Cloudflare 错误码映射

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareProvider;

const UNKNOWN: &str = "<unknown>";

/// Cloudflare error code mapping
/// Reference: <https://developers.cloudflare.com/fundamentals/api/reference/>
impl ProviderErrorMapper for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let provider = self.provider_name().to_string();
        match raw.code.as_deref() {
            // 认证失败
            // 6003: Invalid request headers
            // 6103: Invalid format for X-Auth-Key header
            // 6111: Invalid format for Authorization header
            // 9109: Unauthorized to access requested resource
            // 10000: Authentication error
            Some("6003" | "6103" | "6111" | "9109" | "10000") => {
                ProviderError::InvalidCredentials {
                    provider,
                    raw_message: Some(raw.message),
                }
            }

            // 10001: token 有效但缺少 DNS:Edit 权限
            Some("10001") => ProviderError::PermissionDenied {
                provider,
                raw_message: Some(raw.message),
            },

            // 参数错误
            // 1004: DNS Validation Error
            // 9000: Invalid or missing name
            // 9021: Invalid TTL
            // 9100: TXT content too long
            Some(code @ ("1004" | "9000" | "9021" | "9100")) => {
                let param = match code {
                    "9000" => "name",
                    "9021" => "ttl",
                    "9100" => "content",
                    _ => "general",
                };
                ProviderError::InvalidParameter {
                    provider,
                    param: param.to_string(),
                    detail: raw.message,
                }
            }

            // 记录已存在
            // 81053-81058: 同名 / 同内容记录冲突
            Some("81053" | "81054" | "81055" | "81056" | "81057" | "81058") => {
                ProviderError::RecordExists {
                    provider,
                    record_name: context.record_name.unwrap_or_else(|| UNKNOWN.to_string()),
                    raw_message: Some(raw.message),
                }
            }

            // 81044: Record does not exist
            Some("81044") => ProviderError::RecordNotFound {
                provider,
                record_id: context.record_id.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            // 81045: The record quota has been exceeded
            Some("81045") => ProviderError::QuotaExceeded {
                provider,
                raw_message: Some(raw.message),
            },

            // zone ID 无效
            // 7000: No route for that URI
            // 7003: Could not route to /path
            Some("7000" | "7003") => ProviderError::ZoneNotFound {
                provider,
                zone: context.zone.unwrap_or_else(|| UNKNOWN.to_string()),
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> CloudflareProvider {
        CloudflareProvider::new("token".to_string(), "zone-abc".to_string()).unwrap()
    }

    fn ctx() -> ErrorContext {
        ErrorContext::default()
    }

    #[test]
    fn debug_hides_api_token() {
        let p = CloudflareProvider::new("secret-token".to_string(), "zone-abc".to_string()).unwrap();
        let debug = format!("{p:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("***"));
        assert!(debug.contains("zone-abc"));
    }

    fn full_ctx() -> ErrorContext {
        ErrorContext {
            record_name: Some("@".to_string()),
            record_id: Some("rec-123".to_string()),
            zone: Some("zone-abc".to_string()),
        }
    }

    #[test]
    fn auth_codes_map_to_invalid_credentials() {
        let p = provider();
        for code in ["6003", "6103", "6111", "9109", "10000"] {
            let err = p.map_error(RawApiError::with_code(code, "auth"), ctx());
            assert!(
                matches!(err, ProviderError::InvalidCredentials { .. }),
                "code {code} mapped to {err:?}"
            );
        }
    }

    #[test]
    fn missing_scope_is_permission_denied() {
        let err = provider().map_error(RawApiError::with_code("10001", "no DNS edit"), ctx());
        assert!(matches!(err, ProviderError::PermissionDenied { .. }));
    }

    #[test]
    fn invalid_param_names() {
        let p = provider();
        let cases = [
            ("1004", "general"),
            ("9000", "name"),
            ("9021", "ttl"),
            ("9100", "content"),
        ];
        for (code, expected) in cases {
            let err = p.map_error(RawApiError::with_code(code, "bad"), ctx());
            assert!(
                matches!(&err, ProviderError::InvalidParameter { param, .. } if param == expected),
                "code {code} mapped to {err:?}"
            );
        }
    }

    #[test]
    fn record_exists_uses_context_name() {
        let err = provider().map_error(
            RawApiError::with_code("81057", "record already exists"),
            full_ctx(),
        );
        assert!(matches!(
            err,
            ProviderError::RecordExists { record_name, .. } if record_name == "@"
        ));
    }

    #[test]
    fn record_not_found_uses_context_id() {
        let err = provider().map_error(
            RawApiError::with_code("81044", "Record does not exist."),
            full_ctx(),
        );
        assert!(matches!(
            err,
            ProviderError::RecordNotFound { record_id, .. } if record_id == "rec-123"
        ));
    }

    #[test]
    fn record_not_found_without_context() {
        let err = provider().map_error(RawApiError::with_code("81044", "gone"), ctx());
        assert!(matches!(
            err,
            ProviderError::RecordNotFound { record_id, .. } if record_id == "<unknown>"
        ));
    }

    #[test]
    fn quota_exceeded() {
        let err = provider().map_error(RawApiError::with_code("81045", "quota"), ctx());
        assert!(matches!(err, ProviderError::QuotaExceeded { .. }));
    }

    #[test]
    fn zone_not_found_uses_context_zone() {
        let err = provider().map_error(RawApiError::with_code("7003", "could not route"), full_ctx());
        assert!(matches!(
            err,
            ProviderError::ZoneNotFound { zone, .. } if zone == "zone-abc"
        ));
    }

    #[test]
    fn unmapped_code_falls_back_to_unknown() {
        let err = provider().map_error(RawApiError::with_code("99999", "something odd"), ctx());
        assert!(matches!(
            err,
            ProviderError::Unknown { raw_code, raw_message, .. }
                if raw_code.as_deref() == Some("99999") && raw_message == "something odd"
        ));
    }

    #[test]
    fn missing_code_falls_back_to_unknown() {
        let err = provider().map_error(RawApiError::new("Unknown error"), ctx());
        assert!(matches!(
            err,
            ProviderError::Unknown { raw_code: None, provider, .. } if provider == "cloudflare"
        ));
    }
}
