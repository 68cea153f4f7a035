//! Principal resolution from the request execution context.
//!
//! The API layer authenticates callers and hands the resolved facts to this
//! module; resolution itself is pure and fails closed. Nothing here touches
//! the store.

use std::fmt;

use uuid::Uuid;

/// The identity an operation executes as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Principal {
    /// An authenticated account.
    Account(Uuid),
    /// An unauthenticated caller, possibly bearing a share token.
    Anonymous,
    /// The trusted backend service identity; bypasses policy the way the
    /// platform service role bypasses row-level checks.
    Service,
}

impl Principal {
    /// Returns the account id for authenticated principals.
    #[inline]
    pub const fn account_id(&self) -> Option<Uuid> {
        match self {
            Principal::Account(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns whether this principal is an authenticated account.
    #[inline]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Principal::Account(_))
    }

    /// Returns whether this principal is anonymous.
    #[inline]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Principal::Anonymous)
    }

    /// Returns whether this principal is the service identity.
    #[inline]
    pub const fn is_service(&self) -> bool {
        matches!(self, Principal::Service)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Principal::Account(id) => write!(f, "account:{id}"),
            Principal::Anonymous => f.write_str("anonymous"),
            Principal::Service => f.write_str("service"),
        }
    }
}

/// Execution context of one incoming operation.
///
/// Built per request and not persisted. Carries at most one authenticated
/// account, at most one presented share token, and the service flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    account_id: Option<Uuid>,
    service_call: bool,
    share_token: Option<String>,
}

impl RequestContext {
    /// Creates a context for an unauthenticated caller.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a context for an authenticated account.
    pub fn authenticated(account_id: Uuid) -> Self {
        Self {
            account_id: Some(account_id),
            ..Self::default()
        }
    }

    /// Creates a context for the backend service identity.
    pub fn service() -> Self {
        Self {
            service_call: true,
            ..Self::default()
        }
    }

    /// Attaches a presented share token to the context.
    pub fn with_share_token(mut self, token: impl Into<String>) -> Self {
        self.share_token = Some(token.into());
        self
    }

    /// Resolves the principal for this context.
    ///
    /// Fails closed: a context whose identity cannot be determined (in
    /// particular a service flag contradicted by an account id) resolves
    /// to [`Principal::Anonymous`].
    pub fn principal(&self) -> Principal {
        match (self.service_call, self.account_id) {
            (true, None) => Principal::Service,
            (true, Some(_)) => Principal::Anonymous,
            (false, Some(id)) => Principal::Account(id),
            (false, None) => Principal::Anonymous,
        }
    }

    /// Returns the presented share token, if any.
    pub fn share_token(&self) -> Option<&str> {
        self.share_token.as_deref()
    }
}
