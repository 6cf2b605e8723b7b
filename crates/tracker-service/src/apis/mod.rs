//! API endpoint implementations for the tracking service.

/// Order tracking endpoint implementation.
pub mod track;
