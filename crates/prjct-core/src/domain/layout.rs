//! Flat views of a directory tree.
//!
//! [`flatten`] lists the relative directory paths a template implies;
//! [`LayoutDiff`] compares that list with what actually exists on disk.

use std::collections::BTreeSet;

use serde::Serialize;

use super::entities::template::Directory;

/// Relative paths of `dirs`, depth-first, each parent immediately before its
/// children. Paths are joined with `/` on every platform. Names are taken
/// verbatim; placeholders are not resolved.
pub fn flatten(dirs: &[Directory], prefix: &str) -> Vec<String> {
    let mut paths = Vec::new();
    collect(dirs, prefix, &mut paths);
    paths
}

fn collect(dirs: &[Directory], prefix: &str, paths: &mut Vec<String>) {
    for dir in dirs {
        let rel = if prefix.is_empty() {
            dir.name.clone()
        } else {
            format!("{prefix}/{}", dir.name)
        };
        paths.push(rel.clone());
        if !dir.children.is_empty() {
            collect(&dir.children, &rel, paths);
        }
    }
}

/// Expected vs actual directories, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutDiff {
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub matching: Vec<String>,
    pub expected_total: usize,
    pub actual_total: usize,
}

impl LayoutDiff {
    pub fn compare<E, A>(expected: E, actual: A) -> Self
    where
        E: IntoIterator<Item = String>,
        A: IntoIterator<Item = String>,
    {
        let expected: BTreeSet<String> = expected.into_iter().collect();
        let actual: BTreeSet<String> = actual.into_iter().collect();

        Self {
            missing: expected.difference(&actual).cloned().collect(),
            extra: actual.difference(&expected).cloned().collect(),
            matching: expected.intersection(&actual).cloned().collect(),
            expected_total: expected.len(),
            actual_total: actual.len(),
        }
    }

    pub fn is_in_sync(&self) -> bool {
        self.missing.is_empty()
    }
}
