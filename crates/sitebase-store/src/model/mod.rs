//! Typed row models for the persisted state surface.
//!
//! Each table is represented by a row struct plus, where the table is
//! mutated through the repositories, a `New*` insert payload and an
//! `Update*` partial-change payload.

mod cover_template;
mod document;
mod notification;
mod project;
mod project_member;
mod role_assignment;
mod share_token;
mod task;

pub use self::cover_template::{CoverTemplate, NewCoverTemplate};
pub use self::document::{Document, NewDocument, UpdateDocument};
pub use self::notification::AssignmentNotification;
pub use self::project::{NewProject, Project};
pub use self::project_member::{NewProjectMember, ProjectMember, UpdateProjectMember};
pub use self::role_assignment::RoleAssignment;
pub use self::share_token::{NewShareToken, ShareToken};
pub use self::task::{NewTask, Task, UpdateTask};
