//! 邮件相关类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mailalias_provider::RelayReceipt;

/// 每页默认条数
pub const DEFAULT_PAGE_LIMIT: u64 = 50;
/// 每页最大条数
pub const MAX_PAGE_LIMIT: u64 = 200;

/// 邮件方向，对外序列化为 `type`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EmailDirection {
    Incoming,
    Outgoing,
}

impl EmailDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }

    /// 未知取值返回 `None`（列表查询时视为不过滤）
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "incoming" => Some(Self::Incoming),
            "outgoing" => Some(Self::Outgoing),
            _ => None,
        }
    }
}

/// 一封已存储的邮件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailMessage {
    pub id: String,
    /// 所属账户
    pub user_id: String,
    pub from_email: String,
    pub to_email: String,
    pub subject: String,
    pub body: String,
    pub html_body: Option<String>,
    #[serde(rename = "type")]
    pub direction: EmailDirection,
    pub is_read: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// 列表查询参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailQuery {
    pub direction: Option<EmailDirection>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl EmailQuery {
    /// 从原始查询串参数构造，未知的 `type` 忽略
    pub fn from_params(kind: Option<&str>, limit: Option<u64>, offset: Option<u64>) -> Self {
        Self {
            direction: kind.and_then(EmailDirection::parse),
            limit,
            offset,
        }
    }

    /// 归一化后的 `limit`，限制在 `1..=MAX_PAGE_LIMIT`
    pub fn effective_limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT)
    }

    pub fn effective_offset(&self) -> u64 {
        self.offset.unwrap_or(0)
    }
}

/// 分页结果，`total` 为过滤后的总数
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailPage {
    pub emails: Vec<EmailMessage>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// 外发邮件请求
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
    pub html_body: Option<String>,
}

/// 发送结果
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SendOutcome {
    /// 存储失败时为 `None`
    pub email_id: Option<String>,
    pub relay_response: RelayReceipt,
    pub warning: Option<&'static str>,
}

impl SendOutcome {
    pub const NOT_STORED_WARNING: &'static str = "Email sent but not stored in database";
}
