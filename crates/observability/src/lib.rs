//! Tracing/logging setup shared by native hosts and tests.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::{init, init_with_default};
