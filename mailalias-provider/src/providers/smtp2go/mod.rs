//! SMTP2GO Relay
//!
//! 只实现 `/v3/email/send`，API key 放在请求体里而不是 header。

mod error;
mod relay;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, normalize_base_url};

pub(crate) const SMTP2GO_API_BASE: &str = "https://api.smtp2go.com";
pub(crate) const SEND_PATH: &str = "/v3/email/send";

/// SMTP2GO HTTP relay client
pub struct Smtp2goRelay {
    pub(crate) client: Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl Smtp2goRelay {
    /// Client against the public SMTP2GO API.
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, SMTP2GO_API_BASE)
    }

    /// Client against a custom API root.
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self> {
        Ok(Self {
            client: create_http_client("smtp2go")?,
            api_key,
            base_url: normalize_base_url(base_url),
        })
    }
}

impl std::fmt::Debug for Smtp2goRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Smtp2goRelay")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
