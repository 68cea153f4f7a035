//! Shared type vocabulary for the state layer.
//!
//! Enumerated domains (member positions, token kinds, template categories)
//! and the structured constraint-violation families raised by repositories.

mod constraint;
mod enums;

pub use self::constraint::{
    ConstraintCategory, ConstraintViolation, CoverTemplateConstraints, ProjectMemberConstraints,
    RoleAssignmentConstraints, ShareTokenConstraints,
};
pub use self::enums::{
    AppRole, MemberPosition, NotificationEvent, TaskStatus, TemplateCategory, TokenKind,
};
