//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while talking to the outside world.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Project already exists at target location.
    #[error("project directory already exists: {}", .path.display())]
    ProjectExists { path: PathBuf },

    #[error("permission denied at {}: {reason}", .path.display())]
    PermissionDenied { path: PathBuf, reason: String },

    /// Creating a directory or writing a file failed for a reason other than permissions.
    #[error("cannot create {}: {reason}", .path.display())]
    CreateFailed { path: PathBuf, reason: String },

    /// A post-creation hook failed. Nothing is rolled back.
    #[error("hook {hook:?} failed: {reason}")]
    HookFailed { hook: String, reason: String },

    /// Filesystem operation failed.
    #[error("filesystem error at {}: {reason}", .path.display())]
    FilesystemError { path: PathBuf, reason: String },

    #[error("config file not found: {}", .path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("invalid config file {}: {reason}", .path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    /// Reading or writing the project index or journal failed.
    #[error("{location}: {reason}")]
    StoreError { location: String, reason: String },

    #[error("no project matching {query:?}")]
    ProjectNotFound { query: String },

    /// An external process could not be started or exited unsuccessfully.
    #[error("command {command:?} failed: {reason}")]
    ExternalCommand { command: String, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
            ],
            Self::PermissionDenied { path, .. } => vec![
                format!("Check that you can write to {}", path.display()),
                "Change base_path in your config to a writable location".into(),
            ],
            Self::CreateFailed { path, .. } => vec![
                format!("Failed to create: {}", path.display()),
                "Everything created before the failure was rolled back".into(),
            ],
            Self::HookFailed { hook, .. } => vec![
                format!("Run the hook manually to see its output: {}", hook),
                "The project directory was kept".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the path exists and you have permissions".into(),
            ],
            Self::ConfigNotFound { .. } => vec![
                "Try: prjct install to write the default configuration".into(),
                "Or point to a file with --config <FILE>".into(),
            ],
            Self::ConfigInvalid { .. } => vec![
                "Check the YAML syntax of your configuration".into(),
                "Try: prjct validate <file> to list every issue".into(),
            ],
            Self::StoreError { .. } => vec![
                "The file may be corrupt; fix or delete it and try again".into(),
            ],
            Self::ProjectNotFound { .. } => vec![
                "Try: prjct search to list tracked projects".into(),
                "Use --fuzzy with search to tolerate typos".into(),
            ],
            Self::ExternalCommand { command, .. } => {
                vec![format!("Check that '{}' is installed and on PATH", command)]
            }
            Self::StoreLockError => vec![
                "The store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Conflict,
            Self::PermissionDenied { .. } => ErrorCategory::Permission,
            Self::CreateFailed { .. } | Self::HookFailed { .. } => ErrorCategory::Creation,
            Self::ConfigNotFound { .. } => ErrorCategory::MissingConfiguration,
            Self::ConfigInvalid { .. } => ErrorCategory::Validation,
            Self::ProjectNotFound { .. } => ErrorCategory::NotFound,
            Self::StoreError { .. } | Self::StoreLockError => ErrorCategory::Storage,
            Self::FilesystemError { .. } | Self::ExternalCommand { .. } => ErrorCategory::Internal,
        }
    }
}
