//! # mailalias-provider
//!
//! HTTP clients for the external services behind mailalias: the DNS API that
//! holds forwarding TXT records and the relay API that sends outbound mail.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Trait | Auth Method |
//! |----------|-------------|-------|-------------|
//! | [Cloudflare](https://www.cloudflare.com/) | `cloudflare` | [`DnsProvider`] | Bearer Token |
//! | [SMTP2GO](https://www.smtp2go.com/) | `smtp2go` | [`MailRelay`] | API key in body |
//!
//! ## Feature Flags
//!
//! - **`all-providers`** *(default)*: enable every provider above.
//! - **`native-tls`** *(default)* / **`rustls`**: TLS backend for `reqwest`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mailalias_provider::{create_dns_provider, CreateTxtRecordRequest, ProviderCredentials};
//!
//! # async fn run() -> mailalias_provider::Result<()> {
//! let provider = create_dns_provider(ProviderCredentials::Cloudflare {
//!     api_token: "your-token".to_string(),
//!     zone_id: "your-zone".to_string(),
//! })?;
//!
//! let records = provider.list_txt_records("@").await?;
//! if records.is_empty() {
//!     provider
//!         .create_record(&CreateTxtRecordRequest::at_apex("forward-email=jdoe:ext@gmail.com"))
//!         .await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, ProviderError>`](ProviderError). Provider
//! error codes are mapped onto structured variants; the provider's own text is
//! available through [`ProviderError::provider_message`]. Nothing is retried.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

#[cfg(feature = "cloudflare")]
pub use factory::create_dns_provider;
#[cfg(feature = "smtp2go")]
pub use factory::create_mail_relay;

pub use traits::{DnsProvider, MailRelay};

pub use types::{
    CreateTxtRecordRequest, ProviderCredentials, ProviderType, RelayEmail, RelayReceipt,
    TTL_AUTOMATIC, TxtRecord, ZONE_APEX,
};

pub use providers::common::create_http_client;
pub use utils::log_sanitizer;

#[cfg(feature = "cloudflare")]
pub use providers::CloudflareProvider;
#[cfg(feature = "smtp2go")]
pub use providers::Smtp2goRelay;
