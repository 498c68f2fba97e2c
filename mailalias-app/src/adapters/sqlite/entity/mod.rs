//! `SeaORM` entities backing `SqliteStore`.

pub mod email;
pub mod profile;
pub mod session;
