//! Cloudflare DnsProvider trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{DnsProvider, ErrorContext};
use crate::types::{CreateTxtRecordRequest, TxtRecord};

use super::types::{CreateRecordBody, PatchContentBody};
use super::{CloudflareDnsRecord, CloudflareProvider, MAX_PAGE_SIZE_RECORDS};

const TXT: &str = "TXT";

impl CloudflareProvider {
    fn records_path(&self) -> String {
        format!("/zones/{}/dns_records", self.zone_id)
    }

    fn record_path(&self, record_id: &str) -> String {
        format!("/zones/{}/dns_records/{record_id}", self.zone_id)
    }

    fn zone_context(&self) -> ErrorContext {
        ErrorContext {
            zone: Some(self.zone_id.clone()),
            ..ErrorContext::default()
        }
    }

    fn record_context(&self, record_id: &str) -> ErrorContext {
        ErrorContext {
            record_id: Some(record_id.to_string()),
            zone: Some(self.zone_id.clone()),
            ..ErrorContext::default()
        }
    }

    pub(crate) fn to_txt_record(record: CloudflareDnsRecord) -> TxtRecord {
        TxtRecord {
            id: record.id,
            name: record.name,
            content: record.content,
            ttl: record.ttl,
        }
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn list_txt_records(&self, name: &str) -> Result<Vec<TxtRecord>> {
        let path = format!(
            "{}?type={TXT}&name={}&per_page={MAX_PAGE_SIZE_RECORDS}",
            self.records_path(),
            urlencoding::encode(name)
        );
        let records: Vec<CloudflareDnsRecord> = self.get(&path, self.zone_context()).await?;
        log::debug!(
            "[cloudflare] zone {} 下 {name} 共 {} 条 TXT 记录",
            self.zone_id,
            records.len()
        );
        Ok(records.into_iter().map(Self::to_txt_record).collect())
    }

    async fn create_record(&self, req: &CreateTxtRecordRequest) -> Result<TxtRecord> {
        let body = CreateRecordBody {
            record_type: TXT,
            name: &req.name,
            content: &req.content,
            ttl: req.ttl,
        };
        let context = ErrorContext {
            record_name: Some(req.name.clone()),
            ..self.zone_context()
        };
        let record: CloudflareDnsRecord = self.post(&self.records_path(), &body, context).await?;
        log::info!("[cloudflare] 已创建 TXT 记录 {}", record.id);
        Ok(Self::to_txt_record(record))
    }

    async fn update_record_content(&self, record_id: &str, content: &str) -> Result<TxtRecord> {
        let body = PatchContentBody { content };
        let record: CloudflareDnsRecord = self
            .patch(&self.record_path(record_id), &body, self.record_context(record_id))
            .await?;
        log::info!("[cloudflare] 已更新 TXT 记录 {record_id}");
        Ok(Self::to_txt_record(record))
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        self.delete(&self.record_path(record_id), self.record_context(record_id))
            .await?;
        log::info!("[cloudflare] 已删除 TXT 记录 {record_id}");
        Ok(())
    }
}
