// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for prjct.
//!
//! Pure business logic: the template model and its inheritance merge,
//! validation, name sanitization, variable substitution, `when:` conditions,
//! the directory flattener, and the project index / journal documents.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, process or clock access; callers pass `now`
//! - **Few crates**: std + thiserror + serde (documents) + chrono (timestamps)
//! - **Owned values**: Everything is Clone + PartialEq and safe to mutate
//!
// Public API - what the world sees
pub mod condition;
pub mod entities;
pub mod error;
pub mod layout;
pub mod naming;
pub mod validation;
pub mod variables;

// Re-exports for convenience
pub use condition::{Condition, eval_when};
pub use entities::{
    journal::{JOURNAL_CAPACITY, Journal, OperationKind, OperationRecord},
    project_entry::{DEFAULT_FUZZY_DISTANCE, ProjectEntry, ProjectIndex, filter_by_template},
    template::{Directory, FileTemplate, Template, Variable},
    template_set::TemplateSet,
};
pub use error::{DomainError, ErrorCategory};
pub use layout::{LayoutDiff, flatten};
pub use naming::sanitize_project_name;
pub use validation::{MAX_DIRECTORY_DEPTH, RESERVED_TEMPLATE_IDS, ValidationIssue};
pub use variables::Variables;
