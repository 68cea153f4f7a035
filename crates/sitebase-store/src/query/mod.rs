//! Repository traits for the persisted state surface.
//!
//! One trait per table, implemented on [`MemStore`]. Method futures are
//! `Send` so repositories compose across task boundaries.
//!
//! [`MemStore`]: crate::MemStore

mod cover_template;
mod document;
mod notification;
mod project;
mod project_member;
mod role_assignment;
mod share_token;
mod task;

pub use self::cover_template::CoverTemplateRepository;
pub use self::document::DocumentRepository;
pub use self::notification::NotificationRepository;
pub use self::project::ProjectRepository;
pub use self::project_member::ProjectMemberRepository;
pub use self::role_assignment::RoleRepository;
pub use self::share_token::ShareTokenRepository;
pub use self::task::TaskRepository;
