//! Common types module for the order tracking service.
//!
//! This module defines the core data types and structures shared by the
//! tracker components. It provides a centralized location for domain,
//! API, and validation types to ensure consistency across all crates.

/// API types for the HTTP endpoint and request/response structures.
pub mod api;
/// Order domain types including the status flow building blocks.
pub mod order;
/// Configuration schema types for ensuring type-safe configurations.
pub mod schema;
/// Request normalization and validation for tracking lookups.
pub mod validation;

// Re-export all types for convenient access
pub use api::*;
pub use order::*;
pub use schema::*;
pub use validation::*;
