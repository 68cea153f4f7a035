#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for policy evaluation.
///
/// Use this target for logging evaluation outcomes and registry lookups.
pub const TRACING_TARGET_ENGINE: &str = "sitebase_authz::engine";

/// Tracing target for share-token redemption and validation.
pub const TRACING_TARGET_TOKEN: &str = "sitebase_authz::token";

mod bucket;
mod engine;
mod error;
mod policy;
mod principal;
mod resource;

pub use crate::bucket::{BucketAccess, BucketRegistry, BucketSpec};
pub use crate::engine::{Decision, PolicyEngine, ShareTokenGrant};
pub use crate::error::{AuthzError, AuthzResult};
pub use crate::policy::{AccessPredicate, AccessRule, Operation, PolicyRegistry, ResourceKind, TablePolicy};
pub use crate::principal::{Principal, RequestContext};
pub use crate::resource::{AsResourceRef, ResourceRef};
