//! Application bootstrap for mailalias.
//!
//! Provides `AppState` (service container) and `AppStateBuilder`
//! (adapter and external-service injection).

pub mod adapters;

use std::sync::Arc;

use mailalias_core::error::{CoreError, CoreResult};
use mailalias_core::services::{
    ForwardingReconciler, ForwardingService, MailboxService, SendService, ServiceContext,
    SessionService, WebhookTestService, DEFAULT_APEX_DOMAIN,
};
use mailalias_core::traits::{EmailRepository, ProfileRepository, SessionRepository};
use mailalias_core::types::DnsSyncConfig;
use mailalias_provider::{create_mail_relay, MailRelay};

/// Application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all storage adapters and external clients)
    pub ctx: Arc<ServiceContext>,
    /// Forwarding settings + DNS reconciliation
    pub forwarding_service: ForwardingService,
    /// Inbox / sent listing and read state
    pub mailbox_service: MailboxService,
    /// Outbound mail
    pub send_service: SendService,
    /// Bearer token resolution
    pub session_service: SessionService,
    /// Inbound webhook self-test
    pub webhook_test_service: WebhookTestService,
}

impl AppState {
    /// Whether forwarding changes are pushed to DNS.
    #[must_use]
    pub fn dns_sync_enabled(&self) -> bool {
        self.ctx.reconciler.is_enabled()
    }

    /// Whether outbound mail can be sent.
    #[must_use]
    pub fn relay_configured(&self) -> bool {
        self.ctx.mail_relay.is_some()
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `profile_repository`
/// - `email_repository`
/// - `session_repository`
///
/// # Optional
/// - `dns_sync` / `reconciler` — defaults to no DNS sync
/// - `relay_api_key` / `mail_relay` — defaults to no relay (send returns a configuration error)
/// - `apex_domain` — defaults to [`DEFAULT_APEX_DOMAIN`]
#[derive(Default)]
pub struct AppStateBuilder {
    profile_repository: Option<Arc<dyn ProfileRepository>>,
    email_repository: Option<Arc<dyn EmailRepository>>,
    session_repository: Option<Arc<dyn SessionRepository>>,
    dns_sync: DnsSyncConfig,
    reconciler: Option<ForwardingReconciler>,
    relay_api_key: Option<String>,
    mail_relay: Option<Arc<dyn MailRelay>>,
    apex_domain: Option<String>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn profile_repository(mut self, repo: Arc<dyn ProfileRepository>) -> Self {
        self.profile_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn email_repository(mut self, repo: Arc<dyn EmailRepository>) -> Self {
        self.email_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn session_repository(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repository = Some(repo);
        self
    }

    /// Use one `SqliteStore` for all three repositories.
    #[cfg(feature = "sqlite-store")]
    #[must_use]
    pub fn sqlite_store(self, store: Arc<adapters::SqliteStore>) -> Self {
        self.profile_repository(store.clone())
            .email_repository(store.clone())
            .session_repository(store)
    }

    /// DNS provider credentials; the reconciler is created in `build`.
    #[must_use]
    pub fn dns_sync(mut self, config: DnsSyncConfig) -> Self {
        self.dns_sync = config;
        self
    }

    /// Inject a ready reconciler, overriding `dns_sync`.
    #[must_use]
    pub fn reconciler(mut self, reconciler: ForwardingReconciler) -> Self {
        self.reconciler = Some(reconciler);
        self
    }

    /// Relay API key; blank keys are treated as absent.
    #[must_use]
    pub fn relay_api_key(mut self, api_key: Option<String>) -> Self {
        self.relay_api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Inject a ready relay client, overriding `relay_api_key`.
    #[must_use]
    pub fn mail_relay(mut self, relay: Arc<dyn MailRelay>) -> Self {
        self.mail_relay = Some(relay);
        self
    }

    #[must_use]
    pub fn apex_domain(mut self, apex_domain: impl Into<String>) -> Self {
        self.apex_domain = Some(apex_domain.into());
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing,
    /// or a provider error if an HTTP client cannot be created.
    pub fn build(self) -> CoreResult<AppState> {
        let profile_repository = self.profile_repository.ok_or_else(|| {
            CoreError::ValidationError("profile_repository is required".to_string())
        })?;
        let email_repository = self.email_repository.ok_or_else(|| {
            CoreError::ValidationError("email_repository is required".to_string())
        })?;
        let session_repository = self.session_repository.ok_or_else(|| {
            CoreError::ValidationError("session_repository is required".to_string())
        })?;

        let reconciler = match self.reconciler {
            Some(reconciler) => reconciler,
            None => ForwardingReconciler::from_config(&self.dns_sync)?,
        };

        let mail_relay = match (self.mail_relay, self.relay_api_key) {
            (Some(relay), _) => Some(relay),
            (None, Some(api_key)) => Some(create_mail_relay(api_key)?),
            (None, None) => {
                log::warn!("SMTP2GO_API_KEY not configured, sending is disabled");
                None
            }
        };

        let apex_domain = self
            .apex_domain
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_APEX_DOMAIN.to_string());

        let ctx = Arc::new(
            ServiceContext::new(profile_repository, email_repository, session_repository)
                .with_reconciler(reconciler)
                .with_mail_relay(mail_relay)
                .with_apex_domain(apex_domain),
        );

        Ok(AppState {
            forwarding_service: ForwardingService::new(Arc::clone(&ctx)),
            mailbox_service: MailboxService::new(Arc::clone(&ctx)),
            send_service: SendService::new(Arc::clone(&ctx)),
            session_service: SessionService::new(Arc::clone(&ctx)),
            webhook_test_service: WebhookTestService::new(Arc::clone(&ctx))?,
            ctx,
        })
    }
}
