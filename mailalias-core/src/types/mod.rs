//! 类型定义模块

mod email;
mod forwarding;
mod profile;
mod webhook;

pub use email::{
    EmailDirection, EmailMessage, EmailPage, EmailQuery, OutgoingEmail, SendOutcome,
    DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
pub use forwarding::{
    DnsSyncConfig, DnsSyncError, ForwardingStatus, ForwardingUpdate, ReconcileAction,
    ReconcileResult, SyncStep,
};
pub use profile::{ForwardingIntent, Profile, Role};
pub use webhook::{SyntheticInboundEmail, WebhookTestOutcome};

// Re-export provider 库的公共类型
pub use mailalias_provider::{RelayEmail, RelayReceipt, TxtRecord};
