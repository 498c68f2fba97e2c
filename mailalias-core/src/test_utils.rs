//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use mailalias_provider::{
    CreateTxtRecordRequest, DnsProvider, MailRelay, ProviderError, RelayEmail, RelayReceipt,
    TxtRecord,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{ForwardingReconciler, ServiceContext};
use crate::traits::{EmailRepository, ProfileRepository, SessionRepository};
use crate::types::{EmailDirection, EmailMessage, Profile};

// ===== MockProfileRepository =====

pub struct MockProfileRepository {
    profiles: RwLock<HashMap<String, Profile>>,
    /// 如果 Some，update_forward_to 返回此错误
    update_error: RwLock<Option<String>>,
    update_calls: AtomicUsize,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
            update_error: RwLock::new(None),
            update_calls: AtomicUsize::new(0),
        }
    }

    pub async fn set_update_error(&self, err: Option<String>) {
        *self.update_error.write().await = err;
    }

    pub async fn set_forward_to(&self, id: &str, forward_to: Option<&str>) {
        if let Some(p) = self.profiles.write().await.get_mut(id) {
            p.forward_to = forward_to.map(str::to_string);
        }
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn find_by_id(&self, account_id: &str) -> CoreResult<Option<Profile>> {
        Ok(self.profiles.read().await.get(account_id).cloned())
    }

    async fn save(&self, profile: &Profile) -> CoreResult<()> {
        self.profiles
            .write()
            .await
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn update_forward_to(
        &self,
        account_id: &str,
        forward_to: Option<&str>,
    ) -> CoreResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref msg) = *self.update_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        let mut store = self.profiles.write().await;
        let profile = store
            .get_mut(account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;
        profile.forward_to = forward_to.map(str::to_string);
        profile.updated_at = Utc::now();
        Ok(())
    }
}

// ===== MockEmailRepository =====

pub struct MockEmailRepository {
    emails: RwLock<Vec<EmailMessage>>,
    insert_error: RwLock<Option<String>>,
}

impl MockEmailRepository {
    pub fn new() -> Self {
        Self {
            emails: RwLock::new(Vec::new()),
            insert_error: RwLock::new(None),
        }
    }

    pub async fn set_insert_error(&self, err: Option<String>) {
        *self.insert_error.write().await = err;
    }

    pub async fn seed(&self, email: EmailMessage) {
        self.emails.write().await.push(email);
    }

    async fn filtered(&self, user_id: &str, direction: Option<EmailDirection>) -> Vec<EmailMessage> {
        let mut matching: Vec<_> = self
            .emails
            .read()
            .await
            .iter()
            .filter(|e| e.user_id == user_id && direction.is_none_or(|d| e.direction == d))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }
}

#[async_trait]
impl EmailRepository for MockEmailRepository {
    async fn list(
        &self,
        user_id: &str,
        direction: Option<EmailDirection>,
        limit: u64,
        offset: u64,
    ) -> CoreResult<Vec<EmailMessage>> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .filtered(user_id, direction)
            .await
            .into_iter()
            .skip(skip)
            .take(take)
            .collect())
    }

    async fn count(&self, user_id: &str, direction: Option<EmailDirection>) -> CoreResult<u64> {
        Ok(self.filtered(user_id, direction).await.len() as u64)
    }

    async fn insert(&self, email: &EmailMessage) -> CoreResult<()> {
        if let Some(ref msg) = *self.insert_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.emails.write().await.push(email.clone());
        Ok(())
    }

    async fn set_read(
        &self,
        user_id: &str,
        email_id: &str,
        is_read: bool,
    ) -> CoreResult<Option<EmailMessage>> {
        let mut store = self.emails.write().await;
        Ok(store
            .iter_mut()
            .find(|e| e.id == email_id && e.user_id == user_id)
            .map(|e| {
                e.is_read = is_read;
                e.clone()
            }))
    }
}

// ===== MockSessionRepository =====

pub struct MockSessionRepository {
    sessions: RwLock<HashMap<String, String>>,
}

impl MockSessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, token: &str, account_id: &str) {
        self.sessions
            .write()
            .await
            .insert(token.to_string(), account_id.to_string());
    }
}

#[async_trait]
impl SessionRepository for MockSessionRepository {
    async fn find_account_id(&self, token: &str) -> CoreResult<Option<String>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }
}

// ===== MockDnsProvider =====

/// 记录下来的写请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsCall {
    Create { name: String, content: String, ttl: u32 },
    Update { id: String, content: String },
    Delete { id: String },
}

pub struct MockDnsProvider {
    records: RwLock<Vec<TxtRecord>>,
    mutations: RwLock<Vec<DnsCall>>,
    list_calls: AtomicUsize,
    list_error: RwLock<Option<ProviderError>>,
    write_error: RwLock<Option<ProviderError>>,
    next_id: AtomicUsize,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<TxtRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            mutations: RwLock::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            list_error: RwLock::new(None),
            write_error: RwLock::new(None),
            next_id: AtomicUsize::new(1),
        }
    }

    pub async fn push_record(&self, record: TxtRecord) {
        self.records.write().await.push(record);
    }

    pub async fn fail_list(&self, err: ProviderError) {
        *self.list_error.write().await = Some(err);
    }

    pub async fn fail_writes(&self, err: ProviderError) {
        *self.write_error.write().await = Some(err);
    }

    pub async fn mutations(&self) -> Vec<DnsCall> {
        self.mutations.read().await.clone()
    }

    pub async fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    async fn record_write(&self, call: DnsCall) -> mailalias_provider::Result<()> {
        self.mutations.write().await.push(call);
        match self.write_error.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DnsProvider for MockDnsProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn list_txt_records(&self, _name: &str) -> mailalias_provider::Result<Vec<TxtRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.list_error.read().await.clone() {
            return Err(err);
        }
        Ok(self.records.read().await.clone())
    }

    async fn create_record(
        &self,
        req: &CreateTxtRecordRequest,
    ) -> mailalias_provider::Result<TxtRecord> {
        self.record_write(DnsCall::Create {
            name: req.name.clone(),
            content: req.content.clone(),
            ttl: req.ttl,
        })
        .await?;
        let record = TxtRecord {
            id: format!("rec-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: req.name.clone(),
            content: req.content.clone(),
            ttl: req.ttl,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn update_record_content(
        &self,
        record_id: &str,
        content: &str,
    ) -> mailalias_provider::Result<TxtRecord> {
        self.record_write(DnsCall::Update {
            id: record_id.to_string(),
            content: content.to_string(),
        })
        .await?;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| ProviderError::RecordNotFound {
                provider: "mock".to_string(),
                record_id: record_id.to_string(),
                raw_message: None,
            })?;
        record.content = content.to_string();
        Ok(record.clone())
    }

    async fn delete_record(&self, record_id: &str) -> mailalias_provider::Result<()> {
        self.record_write(DnsCall::Delete {
            id: record_id.to_string(),
        })
        .await?;
        self.records.write().await.retain(|r| r.id != record_id);
        Ok(())
    }
}

// ===== MockMailRelay =====

pub struct MockMailRelay {
    sent: RwLock<Vec<RelayEmail>>,
    send_count: AtomicUsize,
    error: RwLock<Option<ProviderError>>,
}

impl MockMailRelay {
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            send_count: AtomicUsize::new(0),
            error: RwLock::new(None),
        }
    }

    pub async fn fail_with(&self, err: ProviderError) {
        *self.error.write().await = Some(err);
    }

    pub async fn sent(&self) -> Vec<RelayEmail> {
        self.sent.read().await.clone()
    }

    pub fn send_count(&self) -> usize {
        self.send_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MailRelay for MockMailRelay {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn send(&self, email: &RelayEmail) -> mailalias_provider::Result<RelayReceipt> {
        self.send_count.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.error.read().await.clone() {
            return Err(err);
        }
        self.sent.write().await.push(email.clone());
        Ok(RelayReceipt {
            request_id: Some("req-mock".to_string()),
            succeeded: u32::try_from(email.to.len()).unwrap_or(u32::MAX),
            failed: 0,
            email_id: Some("relay-1".to_string()),
        })
    }
}

// ===== 工厂方法 =====

/// TXT 记录
pub fn txt(id: &str, content: &str) -> TxtRecord {
    TxtRecord {
        id: id.to_string(),
        name: "example.com".to_string(),
        content: content.to_string(),
        ttl: 1,
    }
}

/// 测试邮件，`order` 越大越新
pub fn email(id: &str, user_id: &str, direction: EmailDirection, order: i64) -> EmailMessage {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now);
    EmailMessage {
        id: id.to_string(),
        user_id: user_id.to_string(),
        from_email: "sender@example.org".to_string(),
        to_email: "jdoe@example.com".to_string(),
        subject: format!("subject {id}"),
        body: "body".to_string(),
        html_body: None,
        direction,
        is_read: false,
        sent_at: None,
        created_at: base + Duration::seconds(order),
    }
}

/// 测试上下文：账户 `u1`（别名 `jdoe`，token `token-u1`）已存在
pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub profiles: Arc<MockProfileRepository>,
    pub emails: Arc<MockEmailRepository>,
    pub sessions: Arc<MockSessionRepository>,
    pub dns: Arc<MockDnsProvider>,
    pub relay: Arc<MockMailRelay>,
}

impl TestContext {
    /// DNS 同步开启
    pub async fn with_dns() -> Self {
        Self::build(true, true).await
    }

    /// DNS 凭证未配置
    pub async fn without_dns() -> Self {
        Self::build(false, true).await
    }

    /// 外发中继未配置
    pub async fn without_relay() -> Self {
        Self::build(false, false).await
    }

    async fn build(dns_enabled: bool, relay_enabled: bool) -> Self {
        let profiles = Arc::new(MockProfileRepository::new());
        let emails = Arc::new(MockEmailRepository::new());
        let sessions = Arc::new(MockSessionRepository::new());
        let dns = Arc::new(MockDnsProvider::new());
        let relay = Arc::new(MockMailRelay::new());

        let _ = profiles
            .save(&Profile::new("u1", "jdoe", "example.com"))
            .await;
        sessions.insert("token-u1", "u1").await;

        let reconciler = if dns_enabled {
            ForwardingReconciler::new(dns.clone())
        } else {
            ForwardingReconciler::disabled()
        };
        let mail_relay: Option<Arc<dyn MailRelay>> = if relay_enabled {
            Some(relay.clone())
        } else {
            None
        };

        let ctx = Arc::new(
            ServiceContext::new(profiles.clone(), emails.clone(), sessions.clone())
                .with_reconciler(reconciler)
                .with_mail_relay(mail_relay)
                .with_apex_domain("example.com"),
        );

        Self {
            ctx,
            profiles,
            emails,
            sessions,
            dns,
            relay,
        }
    }
}
