//! # Stockroom API Server library
//!
//! Library crate backing the `stockroom-api` binary; exposed so
//! integration tests can build the router against a test database.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
