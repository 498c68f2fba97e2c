//! mailalias HTTP API
//!
//! Actix-web frontend over `mailalias-app`: configuration, logging,
//! bearer authentication and the JSON routes.

pub mod auth;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;

pub use routes::{PublicUrl, configure};
