use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::entities::{
    template::{Directory, Template},
    template_set::TemplateSet,
};

/// Deepest allowed nesting of `children`, counted from the top-level directories.
pub const MAX_DIRECTORY_DEPTH: usize = 20;

/// Template ids that would shadow a subcommand.
pub const RESERVED_TEMPLATE_IDS: &[&str] = &[
    "list",
    "config",
    "doctor",
    "help",
    "install",
    "search",
    "reindex",
    "open",
    "completion",
    "tree",
    "path",
    "recent",
    "stats",
    "rename",
    "archive",
    "export",
    "import",
    "init",
    "diff",
    "version",
    "sync",
    "clone",
    "clean",
    "note",
    "info",
    "validate",
    "bulk",
    "undo",
    "readme",
    "watch",
];

/// A single problem found in the configuration, addressed by field path
/// (for example `templates[2].directories[0].name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`
pub fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

pub fn is_reserved_template_id(id: &str) -> bool {
    RESERVED_TEMPLATE_IDS.contains(&id)
}

/// Collect every issue in `set`. Never stops at the first one.
pub fn validate_template_set(set: &TemplateSet) -> Vec<ValidationIssue> {
    if set.templates.is_empty() {
        return vec![ValidationIssue::new("templates", "no templates defined")];
    }

    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (i, template) in set.templates.iter().enumerate() {
        let prefix = format!("templates[{i}]");
        validate_identity(template, &prefix, &mut seen, &mut issues);
        validate_structure(template, &prefix, &mut issues);
    }

    // Parents can only be checked once every id is known.
    for (i, template) in set.templates.iter().enumerate() {
        let Some(parent) = template.parent_id() else {
            continue;
        };
        let field = format!("templates[{i}].extends");
        if !seen.contains(parent) {
            issues.push(ValidationIssue::new(
                &field,
                format!("extends {parent:?} references unknown template"),
            ));
        }
        if parent == template.id {
            issues.push(ValidationIssue::new(&field, "template cannot extend itself"));
        }
    }

    for (i, template) in set.templates.iter().enumerate() {
        if let Some(id) = first_cycle_member(set, template) {
            issues.push(ValidationIssue::new(
                format!("templates[{i}].extends"),
                format!("circular inheritance detected involving {id:?}"),
            ));
        }
    }

    issues
}

fn validate_identity<'a>(
    template: &'a Template,
    prefix: &str,
    seen: &mut HashSet<&'a str>,
    issues: &mut Vec<ValidationIssue>,
) {
    let field = format!("{prefix}.id");
    if template.id.is_empty() {
        issues.push(ValidationIssue::new(field, "id is required"));
    } else {
        if !seen.insert(template.id.as_str()) {
            issues.push(ValidationIssue::new(
                &field,
                format!("duplicate id {:?}", template.id),
            ));
        }
        if is_reserved_template_id(&template.id) {
            issues.push(ValidationIssue::new(
                &field,
                format!("id {:?} conflicts with a built-in command", template.id),
            ));
        }
    }

    if template.name.is_empty() {
        issues.push(ValidationIssue::new(format!("{prefix}.name"), "name is required"));
    }
    if template.base_path.is_empty() {
        issues.push(ValidationIssue::new(
            format!("{prefix}.base_path"),
            "base_path is required",
        ));
    }
}

fn validate_structure(template: &Template, prefix: &str, issues: &mut Vec<ValidationIssue>) {
    if template.directories.is_empty() {
        if template.parent_id().is_none() {
            issues.push(ValidationIssue::new(
                format!("{prefix}.directories"),
                "at least one directory is required",
            ));
        }
    } else {
        validate_directories(
            &template.directories,
            &format!("{prefix}.directories"),
            0,
            issues,
        );
    }

    for (j, variable) in template.variables.iter().enumerate() {
        let field = format!("{prefix}.variables[{j}].name");
        if variable.name.is_empty() {
            issues.push(ValidationIssue::new(field, "variable name is required"));
        } else if !is_valid_variable_name(&variable.name) {
            issues.push(ValidationIssue::new(
                field,
                format!(
                    "variable name {:?} must match [a-zA-Z_][a-zA-Z0-9_]*",
                    variable.name
                ),
            ));
        }
    }
}

fn validate_directories(
    dirs: &[Directory],
    prefix: &str,
    depth: usize,
    issues: &mut Vec<ValidationIssue>,
) {
    if depth > MAX_DIRECTORY_DEPTH {
        issues.push(ValidationIssue::new(
            prefix,
            format!("directory nesting exceeds maximum depth of {MAX_DIRECTORY_DEPTH}"),
        ));
        return;
    }

    for (i, dir) in dirs.iter().enumerate() {
        let path = format!("{prefix}[{i}]");
        if dir.name.is_empty() {
            issues.push(ValidationIssue::new(
                format!("{path}.name"),
                "directory name is required",
            ));
        }
        for (j, file) in dir.files.iter().enumerate() {
            if file.name.is_empty() {
                issues.push(ValidationIssue::new(
                    format!("{path}.files[{j}].name"),
                    "file name is required",
                ));
            }
        }
        if !dir.children.is_empty() {
            validate_directories(&dir.children, &format!("{path}.children"), depth + 1, issues);
        }
    }
}

/// Walk the `extends` chain from `template` and return the first id seen twice.
fn first_cycle_member<'a>(set: &'a TemplateSet, template: &'a Template) -> Option<&'a str> {
    let mut visited: HashSet<&str> = HashSet::from([template.id.as_str()]);
    let mut current = template.parent_id();

    while let Some(id) = current {
        if !visited.insert(id) {
            return Some(id);
        }
        current = set.find(id).and_then(Template::parent_id);
    }
    None
}
