//! Policy vocabulary: operations, resource kinds, predicates and the
//! per-kind policy registry.
//!
//! A policy is one [`AccessRule`] per operation; a rule is an OR-combination
//! of atomic predicates. Every tenant-scoped rule carries the administrative
//! override, and composition is always a logical OR, so a narrower ownership
//! or membership rule can never lock an administrator out.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Data operation a policy gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Row read; denial silently filters the row out.
    Select,
    /// Row creation; denial rejects the write.
    Insert,
    /// Row mutation; denial rejects the write.
    Update,
    /// Row removal; denial rejects the write.
    Delete,
}

impl Operation {
    /// Returns whether this operation only reads.
    #[inline]
    pub const fn is_read(self) -> bool {
        matches!(self, Operation::Select)
    }

    /// Returns whether this operation writes.
    #[inline]
    pub const fn is_write(self) -> bool {
        !self.is_read()
    }
}

/// Kind of protected resource, the first half of the registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Project rows themselves.
    Project,
    /// Membership records of a project.
    ProjectMember,
    /// Global role grants.
    RoleAssignment,
    /// Uploaded document metadata.
    Document,
    /// Comments on documents, including portal-authored ones.
    DocumentComment,
    /// Client invoices.
    Invoice,
    /// Floor plan drawings.
    FloorPlan,
    /// Final account statements.
    FinalAccount,
    /// Project tasks and programme entries.
    Task,
    /// Issued-document cover templates.
    CoverTemplate,
    /// Generator sizing catalog entries.
    GeneratorModel,
}

impl ResourceKind {
    /// Returns whether rows of this kind belong to one project.
    ///
    /// Project-scoped kinds resolve access through membership, never through
    /// direct per-row grants.
    #[inline]
    pub const fn is_project_scoped(self) -> bool {
        !matches!(
            self,
            ResourceKind::RoleAssignment
                | ResourceKind::CoverTemplate
                | ResourceKind::GeneratorModel
        )
    }

    /// Returns whether rows of this kind name a principal.
    #[inline]
    pub const fn is_principal_scoped(self) -> bool {
        matches!(self, ResourceKind::RoleAssignment)
    }

    /// Returns whether this kind is a shared internal catalog.
    #[inline]
    pub const fn is_catalog(self) -> bool {
        matches!(self, ResourceKind::CoverTemplate | ResourceKind::GeneratorModel)
    }
}

/// Atomic predicate over (principal, resource, context).
///
/// Predicates are pure; the checks that need the store go through the
/// engine's raw lookups, never through another policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPredicate {
    /// Principal holds the global admin role.
    AdminRole,
    /// Principal created the row.
    RowOwner,
    /// Principal holds an active membership in the owning project.
    ProjectMember,
    /// Principal holds an administrative position in the owning project.
    ManagingMember,
    /// A valid client- or contractor-portal token for the owning project is
    /// presented; the two kinds are independently sufficient.
    PortalToken,
    /// A valid roadmap-share token for the owning project is presented.
    RoadmapToken,
    /// The row is tagged as originating from the presented, still-valid
    /// token.
    TokenAuthor,
    /// Principal is any authenticated account.
    Authenticated,
    /// Unconditional grant.
    Always,
}

impl AccessPredicate {
    /// Returns whether this predicate can pass for an anonymous caller.
    #[inline]
    pub const fn admits_anonymous(self) -> bool {
        matches!(
            self,
            AccessPredicate::PortalToken
                | AccessPredicate::RoadmapToken
                | AccessPredicate::TokenAuthor
                | AccessPredicate::Always
        )
    }
}

/// OR-combination of predicates; an empty rule denies everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRule {
    predicates: Vec<AccessPredicate>,
}

impl AccessRule {
    /// Creates a rule that passes when any of the predicates passes.
    pub fn any(predicates: impl Into<Vec<AccessPredicate>>) -> Self {
        Self {
            predicates: predicates.into(),
        }
    }

    /// Creates a rule that denies every principal.
    pub fn never() -> Self {
        Self::default()
    }

    /// Returns the predicates in evaluation order.
    pub fn predicates(&self) -> &[AccessPredicate] {
        &self.predicates
    }

    /// Returns whether any predicate can pass for an anonymous caller.
    pub fn admits_anonymous(&self) -> bool {
        self.predicates.iter().any(|p| p.admits_anonymous())
    }

    /// Returns whether this rule is the unconditional authenticated tier.
    pub fn is_open_tier(&self) -> bool {
        self.predicates
            .iter()
            .all(|p| matches!(p, AccessPredicate::Authenticated | AccessPredicate::Always))
            && !self.predicates.is_empty()
    }

    /// Returns whether this rule carries the administrative override.
    pub fn has_admin_override(&self) -> bool {
        self.predicates.contains(&AccessPredicate::AdminRole)
    }
}

/// One rule per operation for a resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePolicy {
    /// Rule gating reads.
    pub select: AccessRule,
    /// Rule gating row creation.
    pub insert: AccessRule,
    /// Rule gating row mutation.
    pub update: AccessRule,
    /// Rule gating row removal.
    pub delete: AccessRule,
}

impl TablePolicy {
    /// Returns the rule for an operation.
    pub fn rule(&self, operation: Operation) -> &AccessRule {
        match operation {
            Operation::Select => &self.select,
            Operation::Insert => &self.insert,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }

    /// Admin-or-owner shape: every operation requires the admin role or row
    /// ownership.
    pub fn admin_or_owner() -> Self {
        use AccessPredicate::{AdminRole, RowOwner};
        let rule = AccessRule::any([AdminRole, RowOwner]);
        Self {
            select: rule.clone(),
            insert: rule.clone(),
            update: rule.clone(),
            delete: rule,
        }
    }

    /// Member-gated shape: reads and mutations require membership of the
    /// owning project, creation requires row ownership.
    pub fn member_gated() -> Self {
        use AccessPredicate::{AdminRole, ProjectMember, RowOwner};
        Self {
            select: AccessRule::any([AdminRole, ProjectMember]),
            insert: AccessRule::any([AdminRole, RowOwner]),
            update: AccessRule::any([AdminRole, ProjectMember]),
            delete: AccessRule::any([AdminRole, RowOwner]),
        }
    }

    /// Portal-readable shape: member-gated, plus anonymous reads through a
    /// valid portal token.
    pub fn portal_readable() -> Self {
        use AccessPredicate::{AdminRole, PortalToken, ProjectMember};
        Self {
            select: AccessRule::any([AdminRole, ProjectMember, PortalToken]),
            ..Self::member_gated()
        }
    }

    /// Open/internal shape: any authenticated principal, unconditionally.
    ///
    /// The weakest tier; [`PolicyRegistry::standard`] refuses to attach it
    /// to principal- or project-scoped kinds.
    pub fn open_internal() -> Self {
        use AccessPredicate::Authenticated;
        let rule = AccessRule::any([Authenticated]);
        Self {
            select: rule.clone(),
            insert: rule.clone(),
            update: rule.clone(),
            delete: rule,
        }
    }

    /// Token-scoped contributor shape: portal-readable, and a token bearer
    /// may create rows tagged with its token, mutate only rows so tagged,
    /// and delete only rows it authored under that token.
    pub fn token_contributor() -> Self {
        use AccessPredicate::{AdminRole, ProjectMember, RowOwner, TokenAuthor};
        Self {
            insert: AccessRule::any([AdminRole, RowOwner, TokenAuthor]),
            update: AccessRule::any([AdminRole, ProjectMember, TokenAuthor]),
            delete: AccessRule::any([AdminRole, RowOwner, TokenAuthor]),
            ..Self::portal_readable()
        }
    }

    /// Overrides the select rule.
    pub fn with_select(mut self, rule: AccessRule) -> Self {
        self.select = rule;
        self
    }

    /// Returns whether every operation is the unconditional authenticated
    /// tier.
    pub fn is_open_tier(&self) -> bool {
        Operation::iter().all(|op| self.rule(op).is_open_tier())
    }
}

/// Registry of table policies keyed by resource kind.
///
/// One registry instance serves the whole access boundary; the latest
/// policy per kind is authoritative and superseded rules are not kept.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: HashMap<ResourceKind, TablePolicy>,
}

impl PolicyRegistry {
    /// Creates an empty registry that denies every kind.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates the platform's standard policy set.
    pub fn standard() -> Self {
        use ResourceKind::*;

        let mut registry = Self::empty();

        registry.set(Project, TablePolicy::portal_readable());
        registry.set(Document, TablePolicy::token_contributor());
        registry.set(DocumentComment, TablePolicy::token_contributor());
        registry.set(FloorPlan, TablePolicy::portal_readable());
        registry.set(
            Task,
            TablePolicy::member_gated().with_select(AccessRule::any([
                AccessPredicate::AdminRole,
                AccessPredicate::ProjectMember,
                AccessPredicate::RoadmapToken,
            ])),
        );

        // Financial records stay member-gated; see the trust-model note in
        // DESIGN.md before widening these.
        registry.set(Invoice, TablePolicy::admin_or_owner());
        registry.set(FinalAccount, TablePolicy::member_gated());

        registry.set(
            ProjectMember,
            TablePolicy {
                select: AccessRule::any([
                    AccessPredicate::AdminRole,
                    AccessPredicate::ProjectMember,
                ]),
                insert: AccessRule::any([
                    AccessPredicate::AdminRole,
                    AccessPredicate::ManagingMember,
                ]),
                update: AccessRule::any([
                    AccessPredicate::AdminRole,
                    AccessPredicate::ManagingMember,
                ]),
                delete: AccessRule::any([
                    AccessPredicate::AdminRole,
                    AccessPredicate::ManagingMember,
                ]),
            },
        );

        // Role grants are mutated only by existing administrators.
        registry.set(
            RoleAssignment,
            TablePolicy {
                select: AccessRule::any([AccessPredicate::AdminRole]),
                insert: AccessRule::any([AccessPredicate::AdminRole]),
                update: AccessRule::any([AccessPredicate::AdminRole]),
                delete: AccessRule::any([AccessPredicate::AdminRole]),
            },
        );

        // Shared catalogs: readable by any authenticated account, template
        // writes stay admin-or-owner.
        registry.set(
            CoverTemplate,
            TablePolicy::admin_or_owner()
                .with_select(AccessRule::any([AccessPredicate::Authenticated])),
        );
        registry.set(GeneratorModel, TablePolicy::open_internal());

        registry.assert_tier_hygiene();
        registry
    }

    /// Sets the policy for a resource kind, replacing any previous one.
    pub fn set(&mut self, kind: ResourceKind, policy: TablePolicy) {
        self.policies.insert(kind, policy);
    }

    /// Returns the policy for a kind; absent kinds deny everything.
    pub fn policy(&self, kind: ResourceKind) -> Option<&TablePolicy> {
        self.policies.get(&kind)
    }

    /// Returns the registered kinds.
    pub fn kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.policies.keys().copied()
    }

    /// Verifies the open tier is confined to shared catalogs.
    ///
    /// The unconditional authenticated tier must never gate principal- or
    /// project-scoped data.
    fn assert_tier_hygiene(&self) {
        for (kind, policy) in &self.policies {
            if policy.is_open_tier() {
                debug_assert!(
                    kind.is_catalog() && !kind.is_principal_scoped(),
                    "open tier attached to scoped kind {kind}"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rule_denies() {
        let rule = AccessRule::never();
        assert!(rule.predicates().is_empty());
        assert!(!rule.admits_anonymous());
    }

    #[test]
    fn test_tenant_scoped_rules_carry_admin_override() {
        let registry = PolicyRegistry::standard();
        for kind in registry.kinds() {
            if kind.is_catalog() {
                continue;
            }
            let policy = registry.policy(kind).unwrap();
            for op in Operation::iter() {
                assert!(
                    policy.rule(op).has_admin_override(),
                    "missing admin override on {kind}/{op}"
                );
            }
        }
    }

    #[test]
    fn test_open_tier_confined_to_catalogs() {
        let registry = PolicyRegistry::standard();
        for kind in registry.kinds() {
            let policy = registry.policy(kind).unwrap();
            if policy.is_open_tier() {
                assert!(kind.is_catalog());
                assert!(!kind.is_principal_scoped());
                assert!(!kind.is_project_scoped());
            }
        }
    }

    #[test]
    fn test_anonymous_writes_require_token_evidence() {
        let registry = PolicyRegistry::standard();
        for kind in registry.kinds() {
            let policy = registry.policy(kind).unwrap();
            for op in [Operation::Insert, Operation::Update, Operation::Delete] {
                for predicate in policy.rule(op).predicates() {
                    if predicate.admits_anonymous() {
                        assert_eq!(
                            *predicate,
                            AccessPredicate::TokenAuthor,
                            "anonymous {op} on {kind} must be token-tagged"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_unregistered_kind_has_no_policy() {
        let registry = PolicyRegistry::empty();
        assert!(registry.policy(ResourceKind::Invoice).is_none());
    }
}
