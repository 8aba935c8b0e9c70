//! Project-name sanitization.
//!
//! The result is a single path segment that is legal on Windows, macOS and
//! Linux. Spaces and Unicode pass through; only control characters and
//! `<>:"/\|?*` are replaced. Windows device names are rejected everywhere so
//! a generated project can be copied to any machine.

use super::error::DomainError;

/// Longest accepted name, in Unicode scalar values.
pub const MAX_NAME_CHARS: usize = 255;

const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Turn `raw` into a filesystem-safe directory name or explain why it cannot be one.
pub fn sanitize_project_name(raw: &str) -> Result<String, DomainError> {
    let reject = |name: &str, reason: &str| DomainError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(reject(raw, "name cannot be empty"));
    }

    let replaced: String = trimmed
        .chars()
        .map(|c| {
            if (c as u32) < 0x20 || ILLEGAL_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect();

    let name = replaced.trim_end_matches(['.', ' ']);
    if name.is_empty() {
        return Err(reject(raw, "name contains only invalid characters"));
    }

    if name == "." || name == ".." {
        return Err(reject(name, "name is not allowed"));
    }

    if is_reserved_device_name(name) {
        return Err(reject(name, "name is a reserved system name"));
    }
    let stem = name.split('.').next().unwrap_or(name);
    if is_reserved_device_name(stem) {
        return Err(reject(name, "name contains a reserved system name"));
    }

    if name.chars().count() > MAX_NAME_CHARS {
        return Err(reject(
            name,
            &format!("name exceeds maximum length of {MAX_NAME_CHARS} characters"),
        ));
    }

    Ok(name.to_string())
}

fn is_reserved_device_name(candidate: &str) -> bool {
    RESERVED_DEVICE_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(candidate))
}
