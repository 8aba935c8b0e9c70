//! Infrastructure adapters for prjct.
//!
//! This crate implements the ports defined in `prjct_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod archive;
pub mod config_file;
pub mod filesystem;
pub mod hooks;
pub mod store;

// Re-export commonly used adapters
pub use archive::TarGzArchiver;
pub use config_file::{DEFAULT_CONFIG_YAML, YamlTemplateSource, write_default_config};
pub use filesystem::{InjectedFailure, LocalFilesystem, MemoryFilesystem};
pub use hooks::{RecordingHookRunner, ShellHookRunner};
pub use store::{JsonJournal, JsonProjectIndex};
