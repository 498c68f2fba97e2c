//! Cloudflare API 类型定义

use serde::{Deserialize, Serialize};

use crate::traits::RawApiError;

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    /// 部分端点（如 DELETE）的 2xx 响应不带 success，缺省视为成功
    #[serde(default = "default_success")]
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<CloudflareError>>,
}

const fn default_success() -> bool {
    true
}

/// 非 2xx 响应的错误信封，只关心 errors 字段
#[derive(Debug, Deserialize)]
pub struct CloudflareErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

impl CloudflareError {
    pub(crate) fn into_raw(self) -> RawApiError {
        match self.code {
            Some(code) => RawApiError::with_code(code.to_string(), self.message),
            None => RawApiError::new(self.message),
        }
    }
}

/// Cloudflare DNS Record 结构（响应）
#[derive(Debug, Deserialize)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub content: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

fn default_ttl() -> u32 {
    crate::types::TTL_AUTOMATIC
}

/// 创建记录请求体
#[derive(Debug, Serialize)]
pub struct CreateRecordBody<'a> {
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub name: &'a str,
    pub content: &'a str,
    pub ttl: u32,
}

/// 更新记录请求体（PATCH 只发送 content）
#[derive(Debug, Serialize)]
pub struct PatchContentBody<'a> {
    pub content: &'a str,
}
