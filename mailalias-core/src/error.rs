//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use mailalias_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No profile for the account
    #[error("Profile not found: {0}")]
    AccountNotFound(String),

    /// Message does not exist or belongs to another account
    #[error("Email not found: {0}")]
    EmailNotFound(String),

    /// Malformed input, reported before any external call
    #[error("{0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// A required external service is not configured
    #[error("{0}")]
    ConfigurationError(String),

    /// Missing or unknown session
    #[error("Unauthorized")]
    Unauthorized,

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Webhook delivery failed
    #[error("Webhook error: {0}")]
    WebhookError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::AccountNotFound(_)
            | Self::EmailNotFound(_)
            | Self::ValidationError(_)
            | Self::Unauthorized => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_classification() {
        assert!(CoreError::ValidationError("Invalid email address".into()).is_expected());
        assert!(CoreError::AccountNotFound("u1".into()).is_expected());
        assert!(!CoreError::StorageError("disk full".into()).is_expected());
        assert!(!CoreError::ConfigurationError("missing key".into()).is_expected());
    }

    #[test]
    fn provider_errors_keep_their_classification() {
        let err: CoreError = ProviderError::InvalidCredentials {
            provider: "smtp2go".into(),
            raw_message: None,
        }
        .into();
        assert!(err.is_expected());

        let err: CoreError = ProviderError::NetworkError {
            provider: "smtp2go".into(),
            detail: "connection refused".into(),
        }
        .into();
        assert!(!err.is_expected());
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::EmailNotFound("e1".into())).unwrap();
        assert_eq!(json["code"], "EmailNotFound");
        assert_eq!(json["details"], "e1");
    }
}
