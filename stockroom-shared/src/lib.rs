//! # Stockroom Shared Library
//!
//! This crate contains the domain logic shared by the Stockroom API server:
//! credential and session handling plus the inventory checkout workflow.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, session tokens, registration/login flows,
//!   and per-request identity resolution
//! - `models`: database models (users, catalog, checkout ledger)
//! - `db`: SQLite connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Stockroom shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
