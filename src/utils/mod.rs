//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Invite code generation and validation
//! - [`token`] - API token generation and hashing

pub mod code_generator;
pub mod token;
