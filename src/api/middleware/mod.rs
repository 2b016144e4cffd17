//! HTTP middleware for request processing and protection.
//!
//! - [`auth`] - Bearer token authentication, resolves the current user
//! - [`rate_limit`] - Per-client token bucket
//! - [`tracing`] - Request/response logging

pub mod auth;
pub mod rate_limit;
pub mod tracing;
