//! Cloudflare DNS Provider

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, normalize_base_url};

pub(crate) use types::{CloudflareDnsRecord, CloudflareErrorEnvelope, CloudflareResponse};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// Cloudflare DNS Provider
///
/// 绑定单个 zone；记录的增删改查都在该 zone 下进行。
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
    pub(crate) zone_id: String,
    pub(crate) base_url: String,
}

impl CloudflareProvider {
    /// Client against the public Cloudflare API.
    pub fn new(api_token: String, zone_id: String) -> Result<Self> {
        Self::with_base_url(api_token, zone_id, CF_API_BASE)
    }

    /// Client against a custom API root (mock servers, API gateways).
    pub fn with_base_url(api_token: String, zone_id: String, base_url: &str) -> Result<Self> {
        Ok(Self {
            client: create_http_client("cloudflare")?,
            api_token,
            zone_id,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Zone this provider operates on.
    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }
}

impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"***")
            .field("zone_id", &self.zone_id)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
