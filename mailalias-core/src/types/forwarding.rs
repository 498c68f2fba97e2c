//! 转发与 DNS 同步相关类型定义

use std::fmt;

use serde::{Deserialize, Serialize};

/// DNS 同步配置
///
/// 任一字段缺失或为空时跳过同步。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsSyncConfig {
    pub provider_api_key: Option<String>,
    pub provider_zone_id: Option<String>,
}

impl DnsSyncConfig {
    /// 两项都存在且非空时返回 `(api_key, zone_id)`
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let key = self.provider_api_key.as_deref().filter(|k| !k.trim().is_empty())?;
        let zone = self.provider_zone_id.as_deref().filter(|z| !z.trim().is_empty())?;
        Some((key, zone))
    }
}

/// 实际执行的分支
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileAction {
    Created,
    Updated,
    Deleted,
    /// 无需变更，没有发出写请求
    Unchanged,
}

/// 失败发生在哪一步
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SyncStep {
    List,
    Create,
    Update,
    Delete,
}

/// DNS 同步失败
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsSyncError {
    pub step: SyncStep,
    /// Provider 返回的错误消息
    pub reason: String,
}

impl fmt::Display for DnsSyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = &self.reason;
        match self.step {
            SyncStep::List => write!(f, "Cloudflare API error: {reason}"),
            SyncStep::Create => write!(f, "Failed to create DNS record: {reason}"),
            SyncStep::Update => write!(f, "Failed to update DNS record: {reason}"),
            SyncStep::Delete => write!(f, "Failed to delete DNS record: {reason}"),
        }
    }
}

impl std::error::Error for DnsSyncError {}

/// 一次同步的结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum ReconcileResult {
    /// 未配置 DNS 凭证，没有发出任何请求
    Skipped,
    Applied(ReconcileAction),
    Failed(DnsSyncError),
}

impl ReconcileResult {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// `GET /api/forwarding` 的返回内容
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForwardingStatus {
    pub alias: String,
    pub email: String,
    pub forward_to: Option<String>,
    pub forwarding_enabled: bool,
}

/// 转发设置更新结果
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ForwardingUpdate {
    pub alias: String,
    pub email: String,
    pub forward_to: Option<String>,
    pub message: String,
    pub dns: ReconcileResult,
}

impl ForwardingUpdate {
    pub const DNS_FAILURE_WARNING: &'static str =
        "Forwarding updated in database, but Cloudflare DNS update failed";

    /// 仅在 DNS 同步失败时返回警告
    pub fn warning(&self) -> Option<&'static str> {
        self.dns.is_failed().then_some(Self::DNS_FAILURE_WARNING)
    }

    /// DNS 同步失败的详细原因
    pub fn details(&self) -> Option<String> {
        match &self.dns {
            ReconcileResult::Failed(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_requires_both_values() {
        let full = DnsSyncConfig {
            provider_api_key: Some("key".into()),
            provider_zone_id: Some("zone".into()),
        };
        assert_eq!(full.credentials(), Some(("key", "zone")));

        let blank_zone = DnsSyncConfig {
            provider_api_key: Some("key".into()),
            provider_zone_id: Some("  ".into()),
        };
        assert!(blank_zone.credentials().is_none());
        assert!(DnsSyncConfig::default().credentials().is_none());
    }

    #[test]
    fn sync_error_display_prefix_per_step() {
        let err = |step| DnsSyncError {
            step,
            reason: "boom".into(),
        };
        assert_eq!(err(SyncStep::List).to_string(), "Cloudflare API error: boom");
        assert_eq!(
            err(SyncStep::Create).to_string(),
            "Failed to create DNS record: boom"
        );
        assert_eq!(
            err(SyncStep::Update).to_string(),
            "Failed to update DNS record: boom"
        );
        assert_eq!(
            err(SyncStep::Delete).to_string(),
            "Failed to delete DNS record: boom"
        );
    }

    #[test]
    fn update_warning_only_on_failure() {
        let mut update = ForwardingUpdate {
            alias: "jdoe".into(),
            email: "jdoe@example.com".into(),
            forward_to: None,
            message: "Forwarding disabled".into(),
            dns: ReconcileResult::Skipped,
        };
        assert!(update.warning().is_none());

        update.dns = ReconcileResult::Failed(DnsSyncError {
            step: SyncStep::Delete,
            reason: "Unknown error".into(),
        });
        assert_eq!(update.warning(), Some(ForwardingUpdate::DNS_FAILURE_WARNING));
        assert_eq!(
            update.details().as_deref(),
            Some("Failed to delete DNS record: Unknown error")
        );
    }
}
