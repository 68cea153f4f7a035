//! Role repository for managing global capability grants.

use std::future::Future;

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::RoleAssignment;
use crate::types::{AppRole, ConstraintViolation, RoleAssignmentConstraints};
use crate::{MemStore, StoreError, StoreResult, TRACING_TARGET_QUERY};

/// Repository for role assignment operations.
///
/// `account_has_role` is the privilege-elevated lookup behind the policy
/// layer's role check: it reads the assignment table directly so that
/// evaluating the policy protecting this very table never re-enters policy
/// evaluation.
pub trait RoleRepository {
    /// Grants a role to an account.
    fn grant_role(
        &self,
        account_id: Uuid,
        role: AppRole,
        granted_by: Uuid,
    ) -> impl Future<Output = StoreResult<RoleAssignment>> + Send;

    /// Revokes a role from an account.
    fn revoke_role(
        &self,
        account_id: Uuid,
        role: AppRole,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Checks whether an account holds a role.
    ///
    /// Returns `false` for unknown accounts or unheld roles; read-only.
    fn account_has_role(
        &self,
        account_id: Uuid,
        role: AppRole,
    ) -> impl Future<Output = StoreResult<bool>> + Send;

    /// Lists all holders of a role ordered by grant time.
    fn list_role_holders(
        &self,
        role: AppRole,
    ) -> impl Future<Output = StoreResult<Vec<RoleAssignment>>> + Send;
}

impl RoleRepository for MemStore {
    async fn grant_role(
        &self,
        account_id: Uuid,
        role: AppRole,
        granted_by: Uuid,
    ) -> StoreResult<RoleAssignment> {
        let mut tables = self.write().await;

        let key = (account_id, role);
        if tables.role_assignments.contains_key(&key) {
            return Err(StoreError::Constraint(ConstraintViolation::RoleAssignment(
                RoleAssignmentConstraints::AssignmentPairUnique,
            )));
        }

        let row = RoleAssignment {
            account_id,
            role,
            granted_by,
            created_at: Timestamp::now(),
        };
        tables.role_assignments.insert(key, row.clone());

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            account_id = %account_id,
            role = %role,
            granted_by = %granted_by,
            "Granted role"
        );

        Ok(row)
    }

    async fn revoke_role(&self, account_id: Uuid, role: AppRole) -> StoreResult<()> {
        let mut tables = self.write().await;
        tables
            .role_assignments
            .remove(&(account_id, role))
            .ok_or(StoreError::NotFound("role_assignments"))?;
        Ok(())
    }

    async fn account_has_role(&self, account_id: Uuid, role: AppRole) -> StoreResult<bool> {
        let tables = self.read().await;
        Ok(tables.role_assignments.contains_key(&(account_id, role)))
    }

    async fn list_role_holders(&self, role: AppRole) -> StoreResult<Vec<RoleAssignment>> {
        let tables = self.read().await;
        let mut holders: Vec<_> = tables
            .role_assignments
            .values()
            .filter(|a| a.role == role)
            .cloned()
            .collect();
        holders.sort_by_key(|a| a.created_at);
        Ok(holders)
    }
}
