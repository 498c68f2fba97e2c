use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CreateTxtRecordRequest, RelayEmail, RelayReceipt, TxtRecord};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（各 Provider 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `RecordExists` 等错误）
    pub record_name: Option<String>,
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
    /// Zone ID（用于 `ZoneNotFound`）
    pub zone: Option<String>,
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS 提供商 Trait
///
/// 每个实例绑定一个 zone，所有操作都作用于该 zone。
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 列出指定名称下的 TXT 记录（单次请求，服务端按类型和名称过滤）
    async fn list_txt_records(&self, name: &str) -> Result<Vec<TxtRecord>>;

    /// 创建 TXT 记录
    async fn create_record(&self, req: &CreateTxtRecordRequest) -> Result<TxtRecord>;

    /// 只替换记录内容，ID 与其它字段保持不变
    async fn update_record_content(&self, record_id: &str, content: &str) -> Result<TxtRecord>;

    /// 删除记录
    async fn delete_record(&self, record_id: &str) -> Result<()>;
}

/// 外发邮件中继 Trait
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// 中继标识符
    fn id(&self) -> &'static str;

    /// 发送一封邮件
    async fn send(&self, email: &RelayEmail) -> Result<RelayReceipt>;
}
