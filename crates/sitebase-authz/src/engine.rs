//! The policy engine: one evaluation point for the whole access boundary.

use sitebase_store::MemStore;
use sitebase_store::model::ShareToken;
use sitebase_store::query::{ProjectMemberRepository, RoleRepository, ShareTokenRepository};
use sitebase_store::types::{AppRole, TokenKind};
use uuid::Uuid;

use crate::bucket::{BucketAccess, BucketRegistry};
use crate::error::{AuthzError, AuthzResult};
use crate::policy::{AccessPredicate, Operation, PolicyRegistry, ResourceKind};
use crate::principal::{Principal, RequestContext};
use crate::resource::{AsResourceRef, ResourceRef};
use crate::{TRACING_TARGET_ENGINE, TRACING_TARGET_TOKEN};

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The operation may proceed.
    Allow,
    /// The operation is filtered or rejected.
    Deny,
}

impl Decision {
    /// Returns whether the decision allows the operation.
    #[inline]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Facts established by redeeming a share token once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareTokenGrant {
    /// Redeemed token record id.
    pub token_id: Uuid,
    /// Token kind.
    pub kind: TokenKind,
    /// Project the token is scoped to.
    pub project_id: Uuid,
    /// Whether the bearer may author comments.
    pub allow_comments: bool,
}

impl From<&ShareToken> for ShareTokenGrant {
    fn from(token: &ShareToken) -> Self {
        Self {
            token_id: token.id,
            kind: token.kind,
            project_id: token.project_id,
            allow_comments: token.allow_comments,
        }
    }
}

/// Centralized authorization evaluator.
///
/// Owns the policy and bucket registries and a store handle. Every check the
/// engine performs against the store goes through the repositories' raw
/// lookups, the privilege-elevated indirection that keeps a policy from
/// re-entering the evaluation of the table it protects. Evaluation is pure:
/// the only mutating entry point is [`PolicyEngine::redeem_token`].
#[derive(Debug, Clone)]
pub struct PolicyEngine {
    store: MemStore,
    registry: PolicyRegistry,
    buckets: BucketRegistry,
}

impl PolicyEngine {
    /// Creates an engine with the standard policy and bucket registries.
    pub fn new(store: MemStore) -> Self {
        Self::with_registries(store, PolicyRegistry::standard(), BucketRegistry::standard())
    }

    /// Creates an engine with custom registries.
    pub fn with_registries(
        store: MemStore,
        registry: PolicyRegistry,
        buckets: BucketRegistry,
    ) -> Self {
        Self {
            store,
            registry,
            buckets,
        }
    }

    /// Returns the underlying store handle.
    pub fn store(&self) -> &MemStore {
        &self.store
    }

    /// Returns the policy registry.
    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    // Relationship predicates and role lookup.
    //
    // These read their tables directly through the repository layer, never
    // through `evaluate`, so they stay stable when invoked from within a
    // policy over the very table they query.

    /// Checks whether an account holds a global role.
    ///
    /// Returns `false` for unknown accounts or unheld roles.
    pub async fn has_role(&self, account_id: Uuid, role: AppRole) -> AuthzResult<bool> {
        Ok(self.store.account_has_role(account_id, role).await?)
    }

    /// Checks whether an account holds an active membership in a project.
    pub async fn is_project_member(
        &self,
        account_id: Uuid,
        project_id: Uuid,
    ) -> AuthzResult<bool> {
        Ok(self.store.check_project_access(project_id, account_id).await?)
    }

    /// Checks whether a presented bearer string is a valid share token for a
    /// project.
    ///
    /// Validity (existence, non-revoked, non-expired) is established at the
    /// moment of the call; nothing is cached and nothing is mutated.
    pub async fn has_valid_share_token(
        &self,
        project_id: Uuid,
        token: &str,
    ) -> AuthzResult<bool> {
        let found = self.store.find_share_token(token).await?;
        Ok(found.is_some_and(|t| t.project_id == project_id && t.is_valid()))
    }

    /// Redeems a presented bearer string once per request.
    ///
    /// This is the single side-effectful access-boundary operation: a valid
    /// token gets its last-used timestamp touched and its grant returned.
    /// Invalid, revoked or expired tokens yield `None`.
    pub async fn redeem_token(&self, token: &str) -> AuthzResult<Option<ShareTokenGrant>> {
        let Some(found) = self.store.find_share_token(token).await? else {
            return Ok(None);
        };
        if !found.is_valid() {
            tracing::debug!(
                target: TRACING_TARGET_TOKEN,
                token_id = %found.id,
                token = %found.token_short(),
                expired = found.is_expired(),
                revoked = found.is_revoked(),
                "Rejected share token"
            );
            return Ok(None);
        }

        self.store.touch_share_token(found.id).await?;

        tracing::debug!(
            target: TRACING_TARGET_TOKEN,
            token_id = %found.id,
            kind = %found.kind,
            project_id = %found.project_id,
            "Redeemed share token"
        );

        Ok(Some(ShareTokenGrant::from(&found)))
    }

    /// Evaluates the policy for one operation on one resource.
    ///
    /// Pure and safe to call concurrently with arbitrary reads and writes; a
    /// false outcome is a filter, not an error.
    pub async fn evaluate(
        &self,
        context: &RequestContext,
        resource: &ResourceRef,
        operation: Operation,
    ) -> AuthzResult<Decision> {
        let principal = context.principal();

        // The backend service identity bypasses row policies entirely.
        if principal.is_service() {
            tracing::debug!(
                target: TRACING_TARGET_ENGINE,
                kind = %resource.kind,
                operation = %operation,
                "Service principal bypasses policy"
            );
            return Ok(Decision::Allow);
        }

        let Some(policy) = self.registry.policy(resource.kind) else {
            // Unregistered kinds fail closed.
            return Ok(Decision::Deny);
        };

        for predicate in policy.rule(operation).predicates() {
            if self
                .check_predicate(*predicate, principal, context, resource)
                .await?
            {
                tracing::debug!(
                    target: TRACING_TARGET_ENGINE,
                    principal = %principal,
                    kind = %resource.kind,
                    operation = %operation,
                    predicate = ?predicate,
                    "Granted"
                );
                return Ok(Decision::Allow);
            }
        }

        tracing::debug!(
            target: TRACING_TARGET_ENGINE,
            principal = %principal,
            kind = %resource.kind,
            operation = %operation,
            "Denied"
        );
        Ok(Decision::Deny)
    }

    /// Evaluates the policy and rejects denied operations.
    ///
    /// The returned denial is uniform and does not disclose whether the
    /// resource exists.
    pub async fn authorize(
        &self,
        context: &RequestContext,
        resource: &ResourceRef,
        operation: Operation,
    ) -> AuthzResult<()> {
        match self.evaluate(context, resource, operation).await? {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(AuthzError::Denied {
                kind: resource.kind,
                operation,
            }),
        }
    }

    /// Filters a result set down to the rows the context may read.
    ///
    /// This is the silent-filter semantics of a denied select: rows the
    /// policy refuses simply disappear from the result.
    pub async fn filter_allowed<T: AsResourceRef>(
        &self,
        context: &RequestContext,
        rows: Vec<T>,
    ) -> AuthzResult<Vec<T>> {
        let mut allowed = Vec::with_capacity(rows.len());
        for row in rows {
            let resource = row.resource_ref();
            if self
                .evaluate(context, &resource, Operation::Select)
                .await?
                .is_allowed()
            {
                allowed.push(row);
            }
        }
        Ok(allowed)
    }

    /// Authorizes a read from a named storage bucket.
    ///
    /// Unknown buckets fail closed. Token-gated buckets accept
    /// administrators, members of the owning project, and valid portal
    /// tokens scoped to it.
    pub async fn authorize_bucket_read(
        &self,
        context: &RequestContext,
        bucket: &str,
        project_id: Option<Uuid>,
    ) -> AuthzResult<()> {
        let principal = context.principal();
        if principal.is_service() {
            return Ok(());
        }

        let denied = || AuthzError::BucketDenied {
            bucket: bucket.to_owned(),
        };
        let Some(spec) = self.buckets.get(bucket) else {
            return Err(denied());
        };

        match spec.access {
            BucketAccess::PublicRead => Ok(()),
            BucketAccess::AuthenticatedRead => {
                if principal.is_authenticated() {
                    Ok(())
                } else {
                    Err(denied())
                }
            }
            BucketAccess::TokenGated => {
                let Some(project_id) = project_id else {
                    return Err(denied());
                };
                if let Some(account_id) = principal.account_id() {
                    if self.has_role(account_id, AppRole::Admin).await?
                        || self.is_project_member(account_id, project_id).await?
                    {
                        return Ok(());
                    }
                }
                if let Some(token) = context.share_token() {
                    if self.has_valid_share_token(project_id, token).await? {
                        return Ok(());
                    }
                }
                Err(denied())
            }
        }
    }

    /// Evaluates one atomic predicate.
    async fn check_predicate(
        &self,
        predicate: AccessPredicate,
        principal: Principal,
        context: &RequestContext,
        resource: &ResourceRef,
    ) -> AuthzResult<bool> {
        match predicate {
            AccessPredicate::Always => Ok(true),

            AccessPredicate::Authenticated => Ok(principal.is_authenticated()),

            AccessPredicate::AdminRole => match principal.account_id() {
                Some(account_id) => self.has_role(account_id, AppRole::Admin).await,
                None => Ok(false),
            },

            AccessPredicate::RowOwner => Ok(principal
                .account_id()
                .is_some_and(|id| resource.created_by == Some(id))),

            AccessPredicate::ProjectMember => {
                let (Some(account_id), Some(project_id)) =
                    (principal.account_id(), resource.project_id)
                else {
                    return Ok(false);
                };
                self.is_project_member(account_id, project_id).await
            }

            AccessPredicate::ManagingMember => {
                let (Some(account_id), Some(project_id)) =
                    (principal.account_id(), resource.project_id)
                else {
                    return Ok(false);
                };
                let position = self
                    .store
                    .check_member_position(project_id, account_id)
                    .await?;
                Ok(position.is_some_and(|p| p.is_administrative()))
            }

            AccessPredicate::PortalToken => {
                self.check_presented_token(context, resource, |t| t.kind.is_portal())
                    .await
            }

            AccessPredicate::RoadmapToken => {
                self.check_presented_token(context, resource, |t| {
                    t.kind == TokenKind::RoadmapShare
                })
                .await
            }

            AccessPredicate::TokenAuthor => {
                let authored = self
                    .check_presented_token(context, resource, |t| {
                        resource.origin_token == Some(t.id)
                            && (resource.kind != ResourceKind::DocumentComment
                                || t.allow_comments)
                    })
                    .await?;
                Ok(authored)
            }
        }
    }

    /// Checks the presented token against validity, project scope and an
    /// extra kind-specific condition. Pure.
    async fn check_presented_token(
        &self,
        context: &RequestContext,
        resource: &ResourceRef,
        condition: impl Fn(&ShareToken) -> bool,
    ) -> AuthzResult<bool> {
        let Some(token) = context.share_token() else {
            return Ok(false);
        };
        let Some(found) = self.store.find_share_token(token).await? else {
            return Ok(false);
        };
        Ok(found.is_valid()
            && resource.project_id == Some(found.project_id)
            && condition(&found))
    }
}
