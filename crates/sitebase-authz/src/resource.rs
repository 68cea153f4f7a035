//! Resource descriptors handed to the policy engine.
//!
//! A [`ResourceRef`] is the evaluator's view of one row: its kind, identity,
//! owning project, creator and originating token. Store models convert into
//! it; kinds persisted outside this workspace (invoices, floor plans, final
//! accounts) are described directly by the caller.

use sitebase_store::model::{CoverTemplate, Document, Project, ProjectMember, RoleAssignment, Task};
use uuid::Uuid;

use crate::policy::ResourceKind;

/// Description of one protected row for policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRef {
    /// Resource kind, the registry key.
    pub kind: ResourceKind,
    /// Row identity.
    pub id: Uuid,
    /// Owning project, for project-scoped kinds.
    pub project_id: Option<Uuid>,
    /// Creating account, when the row has one.
    pub created_by: Option<Uuid>,
    /// Share token the row originated from, for portal-authored rows.
    pub origin_token: Option<Uuid>,
}

impl ResourceRef {
    /// Creates a descriptor with no project, creator or token attribution.
    pub fn new(kind: ResourceKind, id: Uuid) -> Self {
        Self {
            kind,
            id,
            project_id: None,
            created_by: None,
            origin_token: None,
        }
    }

    /// Attaches the owning project.
    pub fn in_project(mut self, project_id: Uuid) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Attaches the creating account.
    pub fn owned_by(mut self, account_id: Uuid) -> Self {
        self.created_by = Some(account_id);
        self
    }

    /// Attaches the originating share token.
    pub fn from_token(mut self, token_id: Uuid) -> Self {
        self.origin_token = Some(token_id);
        self
    }
}

/// Conversion of a row into its policy descriptor.
pub trait AsResourceRef {
    /// Returns the descriptor the policy engine evaluates.
    fn resource_ref(&self) -> ResourceRef;
}

impl AsResourceRef for ResourceRef {
    fn resource_ref(&self) -> ResourceRef {
        *self
    }
}

impl AsResourceRef for Project {
    fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(ResourceKind::Project, self.id)
            .in_project(self.id)
            .owned_by(self.created_by)
    }
}

impl AsResourceRef for ProjectMember {
    fn resource_ref(&self) -> ResourceRef {
        // Membership rows are keyed by the pair; the account half serves as
        // the row identity.
        ResourceRef::new(ResourceKind::ProjectMember, self.account_id)
            .in_project(self.project_id)
            .owned_by(self.created_by)
    }
}

impl AsResourceRef for RoleAssignment {
    fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(ResourceKind::RoleAssignment, self.account_id).owned_by(self.granted_by)
    }
}

impl AsResourceRef for Document {
    fn resource_ref(&self) -> ResourceRef {
        let mut resource =
            ResourceRef::new(ResourceKind::Document, self.id).in_project(self.project_id);
        if let Some(created_by) = self.created_by {
            resource = resource.owned_by(created_by);
        }
        if let Some(origin_token) = self.origin_token {
            resource = resource.from_token(origin_token);
        }
        resource
    }
}

impl AsResourceRef for Task {
    fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(ResourceKind::Task, self.id)
            .in_project(self.project_id)
            .owned_by(self.created_by)
    }
}

impl AsResourceRef for CoverTemplate {
    fn resource_ref(&self) -> ResourceRef {
        ResourceRef::new(ResourceKind::CoverTemplate, self.id).owned_by(self.created_by)
    }
}
