//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `prjct-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory and file operations
//!   - `HookRunner`: post-creation shell commands
//!   - `Archiver`: `.tar.gz` packing of finished projects
//!   - `TemplateSource`: the YAML configuration document
//!   - `ProjectIndexStore` / `JournalStore`: persisted project metadata
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Archiver, Filesystem, HookRunner, JournalStore, ProjectIndexStore, TemplateSource,
};

#[cfg(test)]
pub use output::{
    MockArchiver, MockFilesystem, MockHookRunner, MockJournalStore, MockProjectIndexStore,
    MockTemplateSource,
};
