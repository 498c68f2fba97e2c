//! mailalias Core Library
//!
//! Business logic behind the mailalias HTTP API:
//! - Forwarding settings and DNS TXT-record reconciliation
//! - Mailbox listing and read state
//! - Outbound mail via the relay
//!
//! Storage is abstracted through traits so the platform layer can inject its
//! own implementation (`SeaORM`/SQLite in `mailalias-app`).

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::ServiceContext;
pub use traits::{EmailRepository, ProfileRepository, SessionRepository};
