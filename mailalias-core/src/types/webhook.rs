//! Webhook 自测类型定义

use serde::{Deserialize, Serialize};

/// 投递给入站 webhook 的模拟邮件
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyntheticInboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
    pub message_id: String,
}

/// webhook 的响应
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookTestOutcome {
    /// 2xx，`email_id` 取自响应体
    Delivered { email_id: Option<String> },
    /// 非 2xx，原样带回响应体
    Rejected { status: u16, details: serde_json::Value },
}
