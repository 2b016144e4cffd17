//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching and third-party APIs.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`catalog`] - Book catalog search (Open Library)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod catalog;
pub mod persistence;
