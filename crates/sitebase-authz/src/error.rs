//! Error types for authorization decisions.

use sitebase_store::StoreError;

use crate::policy::{Operation, ResourceKind};

/// Error type for authorization operations.
///
/// A denial is deliberately uniform: its display never names the row or
/// discloses whether it exists, which keeps denied probes indistinguishable
/// from probes against absent resources. The structured fields remain
/// available to internal callers for logging.
#[derive(Debug, thiserror::Error)]
#[must_use = "authorization errors should be handled appropriately"]
pub enum AuthzError {
    /// The policy predicate evaluated to false for this operation.
    #[error("Access denied")]
    Denied {
        /// Resource kind the operation targeted.
        kind: ResourceKind,
        /// Operation that was attempted.
        operation: Operation,
    },

    /// A bucket read was refused.
    #[error("Access denied")]
    BucketDenied {
        /// Bucket the read targeted.
        bucket: String,
    },

    /// The state layer failed while resolving a predicate.
    #[error("State layer error: {0}")]
    Store(#[from] StoreError),
}

impl AuthzError {
    /// Returns whether this error is a policy denial.
    pub fn is_denied(&self) -> bool {
        matches!(
            self,
            AuthzError::Denied { .. } | AuthzError::BucketDenied { .. }
        )
    }

    /// Returns the denied (kind, operation) pair for internal diagnostics.
    pub fn denied_target(&self) -> Option<(ResourceKind, Operation)> {
        match self {
            AuthzError::Denied { kind, operation } => Some((*kind, *operation)),
            _ => None,
        }
    }
}

/// Specialized [`Result`] type for authorization operations.
pub type AuthzResult<T, E = AuthzError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_message_is_uniform() {
        let a = AuthzError::Denied {
            kind: ResourceKind::Invoice,
            operation: Operation::Select,
        };
        let b = AuthzError::Denied {
            kind: ResourceKind::Document,
            operation: Operation::Delete,
        };
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.to_string(), "Access denied");
    }
}
