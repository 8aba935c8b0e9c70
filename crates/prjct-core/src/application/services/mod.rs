//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "create a project" or "undo the last operation".

pub mod history_service;
pub mod index_service;
pub mod layout_service;
pub mod scaffold_service;
pub mod template_service;

pub use history_service::{HistoryService, UndoOutcome};
pub use index_service::{IndexService, SearchQuery};
pub use layout_service::{ArchiveReport, CloneReport, LayoutService, SyncReport};
pub use scaffold_service::{CreateOptions, CreateResult, ScaffoldService};
pub use template_service::{TemplateInfo, TemplateService};
