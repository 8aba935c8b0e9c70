//! `when:` conditions on template directories.
//!
//! Grammar (no composition, no nesting):
//!
//! | Expression       | True when                         |
//! |------------------|-----------------------------------|
//! | *(empty)*        | always                            |
//! | `key != value`   | `vars[key]` differs from `value`  |
//! | `key == value`   | `vars[key]` equals `value`        |
//! | `key`            | `vars[key]` is set and non-empty  |
//!
//! `!=` is looked for before `==`. Keys and values are trimmed; a missing
//! key compares as the empty string.

use std::fmt;

use super::variables::Variables;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Always,
    NotEquals { key: String, value: String },
    Equals { key: String, value: String },
    Truthy { key: String },
}

impl Condition {
    pub fn parse(expression: &str) -> Self {
        let expression = expression.trim();
        if expression.is_empty() {
            return Self::Always;
        }
        if let Some((key, value)) = expression.split_once("!=") {
            return Self::NotEquals {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            };
        }
        if let Some((key, value)) = expression.split_once("==") {
            return Self::Equals {
                key: key.trim().to_string(),
                value: value.trim().to_string(),
            };
        }
        Self::Truthy {
            key: expression.to_string(),
        }
    }

    pub fn evaluate(&self, vars: &Variables) -> bool {
        let lookup = |key: &str| vars.get(key).unwrap_or_default();
        match self {
            Self::Always => true,
            Self::NotEquals { key, value } => lookup(key) != value,
            Self::Equals { key, value } => lookup(key) == value,
            Self::Truthy { key } => !lookup(key).is_empty(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => Ok(()),
            Self::NotEquals { key, value } => write!(f, "{key} != {value}"),
            Self::Equals { key, value } => write!(f, "{key} == {value}"),
            Self::Truthy { key } => f.write_str(key),
        }
    }
}

/// Parse and evaluate `expression` in one step.
pub fn eval_when(expression: &str, vars: &Variables) -> bool {
    Condition::parse(expression).evaluate(vars)
}
