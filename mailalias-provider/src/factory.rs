//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::{DnsProvider, MailRelay};
use crate::types::ProviderCredentials;
use crate::utils::log_sanitizer::mask_secret;

#[cfg(feature = "cloudflare")]
use crate::providers::CloudflareProvider;
#[cfg(feature = "smtp2go")]
use crate::providers::Smtp2goRelay;

/// Creates a [`DnsProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
///
/// # Examples
///
/// ```rust,no_run
/// use mailalias_provider::{create_dns_provider, ProviderCredentials};
///
/// let provider = create_dns_provider(ProviderCredentials::Cloudflare {
///     api_token: "your-token".to_string(),
///     zone_id: "your-zone".to_string(),
/// })?;
/// # Ok::<(), mailalias_provider::ProviderError>(())
/// ```
#[cfg(feature = "cloudflare")]
pub fn create_dns_provider(credentials: ProviderCredentials) -> Result<Arc<dyn DnsProvider>> {
    match credentials {
        ProviderCredentials::Cloudflare { api_token, zone_id } => {
            log::info!(
                "[cloudflare] 使用 token {} 管理 zone {zone_id}",
                mask_secret(&api_token)
            );
            Ok(Arc::new(CloudflareProvider::new(api_token, zone_id)?))
        }
    }
}

/// Creates the SMTP2GO [`MailRelay`] for the given API key.
#[cfg(feature = "smtp2go")]
pub fn create_mail_relay(api_key: String) -> Result<Arc<dyn MailRelay>> {
    log::info!("[smtp2go] 使用 API key {}", mask_secret(&api_key));
    Ok(Arc::new(Smtp2goRelay::new(api_key)?))
}
