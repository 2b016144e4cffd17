//! Domain layer containing business entities and logic.
//!
//! Defines entities, the reading-progress derivation and repository
//! interfaces, independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`progress`] - Chapter and club status derivation
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Membership and ownership rules live in [`crate::application::services`]

pub mod entities;
pub mod progress;
pub mod repositories;
