//! Unified error handling for prjct core.
//!
//! Wraps domain and application errors in one type so callers can match on a
//! single [`ErrorCategory`] when picking an exit code or a display style.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for prjct core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PrjctError {
    /// Errors from the domain layer (names, templates, validation).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (filesystem, hooks, stores).
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl PrjctError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in prjct".into(),
                "Please report this issue at: https://github.com/cosecruz/prjct/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::InvalidName => ErrorCategory::InvalidName,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Application(ApplicationError::StoreLockError))
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidName,
    NotFound,
    Validation,
    MissingConfiguration,
    Conflict,
    Permission,
    Creation,
    Storage,
    Internal,
}

/// Convenient result type alias.
pub type PrjctResult<T> = Result<T, PrjctError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn domain_categories_carry_over() {
        let err: PrjctError = DomainError::InvalidProjectName {
            name: "CON".into(),
            reason: "name is a reserved system name".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::InvalidName);
        assert_eq!(
            err.to_string(),
            "invalid project name 'CON': name is a reserved system name"
        );
    }

    #[test]
    fn application_errors_keep_their_message() {
        let err: PrjctError = ApplicationError::ProjectExists {
            path: PathBuf::from("/p/demo"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert!(err.to_string().contains("/p/demo"));
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn only_lock_errors_are_retryable() {
        assert!(PrjctError::from(ApplicationError::StoreLockError).is_retryable());
        assert!(!PrjctError::Internal {
            message: "x".into()
        }
        .is_retryable());
    }
}
