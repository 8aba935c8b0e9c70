//! Application layer for prjct.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, TemplateService, ...)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ArchiveReport, CloneReport, CreateOptions, CreateResult, HistoryService, IndexService,
    LayoutService, ScaffoldService, SearchQuery, SyncReport,
    TemplateInfo, // DTO for template metadata
    TemplateService, UndoOutcome,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Archiver, Filesystem, HookRunner, JournalStore, ProjectIndexStore, TemplateSource,
};

pub use error::ApplicationError;
