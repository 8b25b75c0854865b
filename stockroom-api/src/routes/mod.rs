/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: registration, login, logout, and the current-identity view
/// - `inventory`: catalog listing and checkout submission

pub mod auth;
pub mod health;
pub mod inventory;
