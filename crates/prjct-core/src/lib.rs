//! prjct Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the prjct
//! project scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            prjct-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, TemplateService,     │
//! │   IndexService, HistoryService, ...)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, HookRunner, TemplateSource,│
//! │  ProjectIndexStore, JournalStore)       │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    prjct-adapters (Infrastructure)      │
//! │ (LocalFilesystem, ShellHookRunner, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Template, TemplateSet, Variables,     │
//! │   sanitize_project_name, flatten)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prjct_core::prelude::*;
//!
//! // 1. Load and validate the configuration
//! let templates = TemplateService::load(&source)?;
//! let template = templates.resolve("video")?;
//!
//! // 2. Sanitize the name and build variables
//! let name = sanitize_project_name("Client: Acme")?;
//! let vars = Variables::builtin(&name, &chrono::Local::now());
//!
//! // 3. Materialize (with injected adapters)
//! let service = ScaffoldService::new(filesystem, hooks).with_home_dir(home);
//! let result = service.create(&template, &name, CreateOptions::new(vars))?;
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, ArchiveReport, CreateOptions, CreateResult, HistoryService,
        IndexService, LayoutService, ScaffoldService, SearchQuery, TemplateInfo, TemplateService,
        UndoOutcome,
        ports::{Archiver, Filesystem, HookRunner, JournalStore, ProjectIndexStore, TemplateSource},
    };
    pub use crate::domain::{
        Directory, DomainError, FileTemplate, LayoutDiff, OperationKind, OperationRecord,
        ProjectEntry, Template, TemplateSet, Variable, Variables, flatten, sanitize_project_name,
    };
    pub use crate::error::{ErrorCategory, PrjctError, PrjctResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
