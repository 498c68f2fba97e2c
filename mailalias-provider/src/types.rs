//! Shared request/response types for the provider clients.

use serde::{Deserialize, Serialize};

/// TTL value meaning "let the provider choose" (Cloudflare's automatic TTL).
pub const TTL_AUTOMATIC: u32 = 1;

/// Record name of the zone apex.
pub const ZONE_APEX: &str = "@";

/// A TXT record as returned by a DNS provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxtRecord {
    /// Provider-specific record identifier.
    pub id: String,
    /// Record name as reported by the provider.
    pub name: String,
    /// Raw TXT payload.
    pub content: String,
    /// Time to live in seconds (`1` = automatic).
    pub ttl: u32,
}

/// Request to create a TXT record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTxtRecordRequest {
    /// Record name (`"@"` for the zone apex).
    pub name: String,
    /// TXT payload.
    pub content: String,
    /// Time to live in seconds.
    pub ttl: u32,
}

impl CreateTxtRecordRequest {
    /// TXT record at the zone apex with automatic TTL.
    #[must_use]
    pub fn at_apex(content: impl Into<String>) -> Self {
        Self {
            name: ZONE_APEX.to_string(),
            content: content.into(),
            ttl: TTL_AUTOMATIC,
        }
    }
}

/// One outbound message handed to a mail relay.
///
/// At least one of `text_body` / `html_body` should be set; the relay
/// derives the missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayEmail {
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Sender address.
    pub sender: String,
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,
    /// HTML body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
}

/// Relay acknowledgement for an accepted message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayReceipt {
    /// Relay-side request identifier, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Number of recipients accepted.
    pub succeeded: u32,
    /// Number of recipients rejected.
    pub failed: u32,
    /// Relay-side message identifier, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}

/// Supported DNS provider types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// Cloudflare DNS (API v4).
    Cloudflare,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cloudflare => write!(f, "cloudflare"),
        }
    }
}

/// Credentials for a DNS provider, bound to one zone.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ProviderCredentials {
    /// Cloudflare API token plus the zone it manages.
    Cloudflare {
        /// Bearer API token.
        api_token: String,
        /// Zone identifier.
        zone_id: String,
    },
}

impl ProviderCredentials {
    /// Provider type for these credentials.
    #[must_use]
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::Cloudflare { .. } => ProviderType::Cloudflare,
        }
    }
}

// Token 不能出现在日志里
impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cloudflare { zone_id, .. } => f
                .debug_struct("Cloudflare")
                .field("api_token", &"***")
                .field("zone_id", zone_id)
                .finish(),
        }
    }
}
