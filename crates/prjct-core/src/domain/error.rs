// ============================================================================
// domain/error.rs - TEMPLATE AND NAMING ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::validation::ValidationIssue;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so callers can keep them alongside partial results)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Naming Errors
    // ========================================================================
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    // ========================================================================
    // Resolution Errors
    // ========================================================================
    #[error("template '{id}' not found")]
    TemplateNotFound { id: String },

    #[error("parent template '{id}' not found")]
    ParentTemplateNotFound { id: String },

    #[error("circular inheritance at '{id}'")]
    CircularInheritance { id: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("configuration has {} issue(s):\n  {}", .issues.len(), format_issues(.issues))]
    ValidationFailed { issues: Vec<ValidationIssue> },
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  ")
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Avoid reserved device names such as CON, NUL, COM1 or LPT1".into(),
                "Names may contain spaces and any Unicode letters".into(),
                "Keep the name under 255 characters".into(),
            ],
            Self::TemplateNotFound { id } => vec![
                format!("No template with id '{}' is defined", id),
                "Try: prjct list to see available templates".into(),
            ],
            Self::ParentTemplateNotFound { id } => vec![
                format!("A template extends '{}', which is not defined", id),
                "Fix the `extends` field or add the missing template".into(),
            ],
            Self::CircularInheritance { id } => vec![
                format!("The `extends` chain loops back to '{}'", id),
                "Remove one of the `extends` links to break the cycle".into(),
            ],
            Self::ValidationFailed { .. } => vec![
                "Fix every issue listed above and run the command again".into(),
                "Try: prjct validate <file> to check a configuration".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. } => ErrorCategory::InvalidName,
            Self::TemplateNotFound { .. }
            | Self::ParentTemplateNotFound { .. }
            | Self::CircularInheritance { .. } => ErrorCategory::NotFound,
            Self::ValidationFailed { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InvalidName,
    NotFound,
    Validation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failed_lists_every_issue() {
        let err = DomainError::ValidationFailed {
            issues: vec![
                ValidationIssue::new("templates[0].id", "id is required"),
                ValidationIssue::new("templates[1].name", "name is required"),
            ],
        };

        let msg = err.to_string();
        assert!(msg.starts_with("configuration has 2 issue(s)"));
        assert!(msg.contains("templates[0].id: id is required"));
        assert!(msg.contains("templates[1].name: name is required"));
    }

    #[test]
    fn resolution_errors_are_not_found() {
        for err in [
            DomainError::TemplateNotFound { id: "x".into() },
            DomainError::ParentTemplateNotFound { id: "x".into() },
            DomainError::CircularInheritance { id: "x".into() },
        ] {
            assert_eq!(err.category(), ErrorCategory::NotFound);
        }
    }
}
