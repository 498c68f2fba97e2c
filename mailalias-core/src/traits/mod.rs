//! Storage layer abstraction trait definition

mod email_repository;
mod profile_repository;
mod session_repository;

pub use email_repository::EmailRepository;
pub use profile_repository::ProfileRepository;
pub use session_repository::SessionRepository;
