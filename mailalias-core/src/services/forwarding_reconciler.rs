//! DNS 转发记录同步
//!
//! 把别名的转发意图同步到 zone apex 的 TXT 记录上：
//! 每个别名至多一条 `forward-email=<alias>:<target>` 记录。
//! 读取、判断、写入之间没有加锁，同一别名的并发请求可能各自创建一条记录。

use std::sync::Arc;

use mailalias_provider::{
    create_dns_provider, CreateTxtRecordRequest, DnsProvider, ProviderCredentials, ProviderError,
    TxtRecord, ZONE_APEX,
};

use crate::error::CoreResult;
use crate::types::{DnsSyncConfig, DnsSyncError, ReconcileAction, ReconcileResult, SyncStep};

/// 转发记录内容前缀
pub const FORWARD_MARKER: &str = "forward-email=";

/// 转发记录同步器
pub struct ForwardingReconciler {
    /// `None` 表示未配置凭证，所有调用直接跳过
    provider: Option<Arc<dyn DnsProvider>>,
}

impl ForwardingReconciler {
    /// 使用指定 provider
    #[must_use]
    pub fn new(provider: Arc<dyn DnsProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// 不做任何 DNS 同步
    #[must_use]
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    /// 按配置创建；API key 或 zone ID 缺失时返回 disabled
    pub fn from_config(config: &DnsSyncConfig) -> CoreResult<Self> {
        let Some((api_key, zone_id)) = config.credentials() else {
            log::warn!("DNS provider credentials not configured, DNS sync disabled");
            return Ok(Self::disabled());
        };
        let provider = create_dns_provider(ProviderCredentials::Cloudflare {
            api_token: api_key.to_string(),
            zone_id: zone_id.to_string(),
        })?;
        Ok(Self::new(provider))
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// 记录内容
    pub fn encode(alias: &str, target: &str) -> String {
        format!("{FORWARD_MARKER}{alias}:{target}")
    }

    /// 第一条同时包含前缀和别名的记录
    pub fn find_existing<'a>(records: &'a [TxtRecord], alias: &str) -> Option<&'a TxtRecord> {
        records
            .iter()
            .find(|r| r.content.contains(FORWARD_MARKER) && r.content.contains(alias))
    }

    /// 让 DNS 状态与期望一致
    ///
    /// `forward_to` 为 `None` 或空字符串表示关闭转发。失败不会重试。
    pub async fn apply(&self, alias: &str, forward_to: Option<&str>) -> ReconcileResult {
        let Some(provider) = &self.provider else {
            log::warn!("DNS sync skipped for {alias}: credentials not configured");
            return ReconcileResult::Skipped;
        };
        let target = forward_to.filter(|t| !t.is_empty());

        let records = match provider.list_txt_records(ZONE_APEX).await {
            Ok(records) => records,
            Err(e) => return Self::failed(alias, SyncStep::List, &e),
        };
        let existing = Self::find_existing(&records, alias);

        let outcome = match (target, existing) {
            (Some(target), Some(record)) => provider
                .update_record_content(&record.id, &Self::encode(alias, target))
                .await
                .map(|_| ReconcileAction::Updated)
                .map_err(|e| (SyncStep::Update, e)),
            (Some(target), None) => provider
                .create_record(&CreateTxtRecordRequest::at_apex(Self::encode(alias, target)))
                .await
                .map(|_| ReconcileAction::Created)
                .map_err(|e| (SyncStep::Create, e)),
            (None, Some(record)) => provider
                .delete_record(&record.id)
                .await
                .map(|()| ReconcileAction::Deleted)
                .map_err(|e| (SyncStep::Delete, e)),
            (None, None) => Ok(ReconcileAction::Unchanged),
        };

        match outcome {
            Ok(action) => {
                log::info!("DNS forwarding record for {alias}: {action:?}");
                ReconcileResult::Applied(action)
            }
            Err((step, e)) => Self::failed(alias, step, &e),
        }
    }

    fn failed(alias: &str, step: SyncStep, err: &ProviderError) -> ReconcileResult {
        let error = DnsSyncError {
            step,
            reason: err.provider_message(),
        };
        if err.is_expected() {
            log::warn!("DNS sync for {alias} failed: {error}");
        } else {
            log::error!("DNS sync for {alias} failed: {error}");
        }
        ReconcileResult::Failed(error)
    }
}
