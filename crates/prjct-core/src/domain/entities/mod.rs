pub mod journal;
pub mod project_entry;
pub mod template;
pub mod template_set;

pub use crate::domain::DomainError;
pub use journal::{Journal, OperationKind, OperationRecord};
pub use project_entry::{ProjectEntry, ProjectIndex};
pub use template::{Directory, FileTemplate, Template, Variable};
pub use template_set::TemplateSet;
