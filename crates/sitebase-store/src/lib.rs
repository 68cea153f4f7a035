#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for repository query operations.
///
/// Use this target for logging query execution, results, and query-related errors.
pub const TRACING_TARGET_QUERY: &str = "sitebase_store::query";

/// Tracing target for invariant-enforcing write triggers.
///
/// Use this target for logging default-flag enforcement and notification emission.
pub const TRACING_TARGET_TRIGGER: &str = "sitebase_store::trigger";

pub mod model;
pub mod query;
mod store;
pub mod types;

mod error;

pub use crate::error::{BoxError, StoreError, StoreResult};
pub use crate::store::MemStore;
