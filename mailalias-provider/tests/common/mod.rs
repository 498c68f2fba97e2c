//! 共享测试工具：wiremock 服务器与响应构造

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::MockServer;

use mailalias_provider::{CloudflareProvider, Smtp2goRelay};

pub const ZONE_ID: &str = "zone-123";
pub const API_TOKEN: &str = "cf-test-token";
pub const RELAY_KEY: &str = "api-test-key";

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 指向 mock 服务器的 Cloudflare provider
pub fn cloudflare(server: &MockServer) -> Option<CloudflareProvider> {
    CloudflareProvider::with_base_url(API_TOKEN.to_string(), ZONE_ID.to_string(), &server.uri())
        .ok()
}

/// 指向 mock 服务器的 SMTP2GO relay
pub fn smtp2go(server: &MockServer) -> Option<Smtp2goRelay> {
    Smtp2goRelay::with_base_url(RELAY_KEY.to_string(), &server.uri()).ok()
}

pub fn records_path() -> String {
    format!("/zones/{ZONE_ID}/dns_records")
}

pub fn record_path(id: &str) -> String {
    format!("/zones/{ZONE_ID}/dns_records/{id}")
}

/// Cloudflare 成功信封
pub fn cf_success(result: Value) -> Value {
    json!({ "success": true, "errors": [], "messages": [], "result": result })
}

/// Cloudflare 失败信封
pub fn cf_failure(code: i64, message: &str) -> Value {
    json!({ "success": false, "errors": [{ "code": code, "message": message }], "result": null })
}

pub fn txt_record(id: &str, content: &str) -> Value {
    json!({
        "id": id,
        "type": "TXT",
        "name": "example.com",
        "content": content,
        "ttl": 1,
        "proxied": false
    })
}
