//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod device;
pub mod health;
pub mod user;
