//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod book;
pub mod club;
pub mod conversation;
pub mod health;
pub mod invite;
pub mod pagination;
pub mod progress;
pub mod subscription;
pub mod user;
