//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `prjct-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Journal, ProjectIndex, TemplateSet};
use crate::error::PrjctResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `prjct_adapters::filesystem::LocalFilesystem` (production)
/// - `prjct_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Creation methods report permission problems as
/// `ApplicationError::PermissionDenied` and every other failure as
/// `ApplicationError::CreateFailed`; the materializer relies on that split.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PrjctResult<()>;

    /// Create a single directory. Fails if the parent is missing or the path exists.
    fn create_dir(&self, path: &Path) -> PrjctResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> PrjctResult<()>;

    fn copy_file(&self, from: &Path, to: &Path) -> PrjctResult<()>;

    fn remove_file(&self, path: &Path) -> PrjctResult<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> PrjctResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PrjctResult<()>;

    /// Every directory below `root` (not `root` itself), relative to it, `/`-separated.
    fn list_dirs(&self, root: &Path) -> PrjctResult<Vec<String>>;

    /// Every file below `root`, relative to it, `/`-separated.
    fn list_files(&self, root: &Path) -> PrjctResult<Vec<String>>;

    fn is_empty_dir(&self, path: &Path) -> PrjctResult<bool>;
}

/// Port for running post-creation hooks.
///
/// Implemented by:
/// - `prjct_adapters::hooks::ShellHookRunner` (`sh -c` / `cmd /c`)
/// - `prjct_adapters::hooks::RecordingHookRunner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait HookRunner: Send + Sync {
    /// Run `command` with `workdir` as the working directory and wait for it.
    fn run(&self, command: &str, workdir: &Path) -> PrjctResult<()>;
}

/// Port for packing a project directory into a single compressed file.
///
/// Implemented by `prjct_adapters::archive::TarGzArchiver`.
#[cfg_attr(test, mockall::automock)]
pub trait Archiver: Send + Sync {
    /// Write `source` and everything below it to `output`, rooted at the
    /// source directory's own name. Returns the number of files packed.
    fn archive(&self, source: &Path, output: &Path) -> PrjctResult<usize>;
}

/// Port for loading the template configuration document.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateSource: Send + Sync {
    /// Load the raw document. Validation is the caller's job.
    fn load(&self) -> PrjctResult<TemplateSet>;
}

/// Port for the persisted project index.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectIndexStore: Send + Sync {
    /// Load the index; a missing store is an empty index.
    fn load(&self) -> PrjctResult<ProjectIndex>;

    fn save(&self, index: &ProjectIndex) -> PrjctResult<()>;
}

/// Port for the persisted operation journal.
#[cfg_attr(test, mockall::automock)]
pub trait JournalStore: Send + Sync {
    /// Load the journal; a missing store is an empty journal.
    fn load(&self) -> PrjctResult<Journal>;

    fn save(&self, journal: &Journal) -> PrjctResult<()>;
}
