//! Error handling for the prjct CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Deterministic exit codes for scripting

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use prjct_core::{application::ApplicationError, domain::DomainError, error::PrjctError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Process exit codes.
pub mod exit {
    pub const GENERAL: u8 = 1;
    pub const CONFIG_NOT_FOUND: u8 = 2;
    pub const CONFIG_INVALID: u8 = 3;
    pub const TEMPLATE_NOT_FOUND: u8 = 4;
    pub const PROJECT_EXISTS: u8 = 5;
    pub const PERMISSION: u8 = 6;
    pub const CREATE_FAILED: u8 = 7;
    pub const INVALID_NAME: u8 = 8;
    pub const CANCELLED: u8 = 9;
}

#[derive(Debug, Error)]
pub enum CliError {
    /// An error propagated from `prjct-core` or an adapter.
    #[error(transparent)]
    Core(#[from] PrjctError),

    /// Config locations could not be resolved.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid user input that clap could not catch.
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Interactive prompt aborted or declined.
    #[error("Operation cancelled")]
    Cancelled,

    /// Feature not compiled in (e.g. interactive mode without `interactive`).
    #[cfg(not(feature = "interactive"))]
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<ApplicationError> for CliError {
    fn from(err: ApplicationError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Core(core) => core.suggestions(),
            Self::ConfigError { .. } => vec![
                "Pass the file explicitly: prjct --config <FILE>".into(),
                "Or set PRJCT_CONFIG_FILE".into(),
            ],
            Self::InvalidInput { .. } => vec!["Use --help for usage information".into()],
            Self::IoError { .. } => vec![
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::Cancelled => vec!["No changes were made".into()],
            #[cfg(not(feature = "interactive"))]
            Self::FeatureNotAvailable { feature } => vec![
                format!("This build was compiled without the '{feature}' feature"),
                "Pass TEMPLATE and NAME on the command line instead".into(),
            ],
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Code | Meaning            |
    /// |------|--------------------|
    /// |  1   | General            |
    /// |  2   | Config not found   |
    /// |  3   | Config invalid     |
    /// |  4   | Template not found |
    /// |  5   | Project exists     |
    /// |  6   | Permission denied  |
    /// |  7   | Create failed      |
    /// |  8   | Invalid name       |
    /// |  9   | Cancelled          |
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Core(PrjctError::Domain(err)) => match err {
                DomainError::InvalidProjectName { .. } => exit::INVALID_NAME,
                DomainError::TemplateNotFound { .. }
                | DomainError::ParentTemplateNotFound { .. }
                | DomainError::CircularInheritance { .. } => exit::TEMPLATE_NOT_FOUND,
                DomainError::ValidationFailed { .. } => exit::CONFIG_INVALID,
            },
            Self::Core(PrjctError::Application(err)) => match err {
                ApplicationError::ProjectExists { .. } => exit::PROJECT_EXISTS,
                ApplicationError::PermissionDenied { .. } => exit::PERMISSION,
                ApplicationError::CreateFailed { .. } | ApplicationError::HookFailed { .. } => {
                    exit::CREATE_FAILED
                }
                ApplicationError::ConfigNotFound { .. } => exit::CONFIG_NOT_FOUND,
                ApplicationError::ConfigInvalid { .. } => exit::CONFIG_INVALID,
                ApplicationError::FilesystemError { .. }
                | ApplicationError::StoreError { .. }
                | ApplicationError::ProjectNotFound { .. }
                | ApplicationError::ExternalCommand { .. }
                | ApplicationError::StoreLockError => exit::GENERAL,
            },
            Self::Core(PrjctError::Internal { .. }) => exit::GENERAL,
            Self::Cancelled => exit::CANCELLED,
            Self::ConfigError { .. } | Self::InvalidInput { .. } | Self::IoError { .. } => {
                exit::GENERAL
            }
            #[cfg(not(feature = "interactive"))]
            Self::FeatureNotAvailable { .. } => exit::GENERAL,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("{} {}\n", "✗".red().bold(), "Error:".red().bold()));
        for line in self.to_string().lines() {
            output.push_str(&format!("  {}\n", line.red()));
        }

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = format!("Error: {self}\n");

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.exit_code() {
            exit::GENERAL => tracing::error!("{}", self),
            _ => tracing::debug!(code = self.exit_code(), "{}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use prjct_core::domain::ValidationIssue;

    fn app(err: ApplicationError) -> CliError {
        err.into()
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn create_failures_map_to_distinct_codes() {
        let path = PathBuf::from("/p");
        assert_eq!(
            app(ApplicationError::ProjectExists { path: path.clone() }).exit_code(),
            5
        );
        assert_eq!(
            app(ApplicationError::PermissionDenied {
                path: path.clone(),
                reason: "denied".into()
            })
            .exit_code(),
            6
        );
        assert_eq!(
            app(ApplicationError::CreateFailed {
                path,
                reason: "disk full".into()
            })
            .exit_code(),
            7
        );
        assert_eq!(
            app(ApplicationError::HookFailed {
                hook: "git init".into(),
                reason: "exit 1".into()
            })
            .exit_code(),
            7
        );
    }

    #[test]
    fn config_errors_map_to_2_and_3() {
        assert_eq!(
            app(ApplicationError::ConfigNotFound {
                path: PathBuf::from("/c.yaml")
            })
            .exit_code(),
            2
        );
        assert_eq!(
            app(ApplicationError::ConfigInvalid {
                path: PathBuf::from("/c.yaml"),
                reason: "bad".into()
            })
            .exit_code(),
            3
        );
        let validation: CliError = DomainError::ValidationFailed {
            issues: vec![ValidationIssue::new("templates", "no templates defined")],
        }
        .into();
        assert_eq!(validation.exit_code(), 3);
    }

    #[test]
    fn template_resolution_errors_map_to_4() {
        for err in [
            DomainError::TemplateNotFound { id: "x".into() },
            DomainError::ParentTemplateNotFound { id: "x".into() },
            DomainError::CircularInheritance { id: "x".into() },
        ] {
            assert_eq!(CliError::from(err).exit_code(), 4);
        }
    }

    #[test]
    fn invalid_name_and_cancel() {
        let err: CliError = DomainError::InvalidProjectName {
            name: "..".into(),
            reason: "reserved".into(),
        }
        .into();
        assert_eq!(err.exit_code(), 8);
        assert_eq!(CliError::Cancelled.exit_code(), 9);
    }

    #[test]
    fn everything_else_is_general() {
        assert_eq!(
            app(ApplicationError::ProjectNotFound { query: "x".into() }).exit_code(),
            1
        );
        assert_eq!(
            CliError::InvalidInput {
                message: "x".into()
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_and_suggestions() {
        let s = app(ApplicationError::ConfigNotFound {
            path: PathBuf::from("/c.yaml"),
        })
        .format_plain(false);
        assert!(s.starts_with("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("prjct install"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "reading stdin".into(),
            source: std::io::Error::other("broken pipe"),
        };
        assert!(err.format_plain(true).contains("Caused by: broken pipe"));
    }
}
