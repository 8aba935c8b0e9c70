//! In-memory filesystem adapter for testing.
//!
//! Mirrors the local adapter's semantics closely enough for materializer
//! tests: `create_dir` needs an existing parent, writes need an existing
//! directory, and failures can be injected per path.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    path::{Component, Path, PathBuf},
    sync::{Arc, RwLock},
};

use prjct_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PrjctError, PrjctResult},
};

/// Failure to inject for a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
    PermissionDenied,
    Io,
}

/// In-memory filesystem for testing. Clones share the same state.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
    failures: HashMap<PathBuf, InjectedFailure>,
}

impl MemoryFilesystemInner {
    fn check_injected(&self, path: &Path) -> PrjctResult<()> {
        let reason = "injected failure".to_string();
        match self.failures.get(path) {
            None => Ok(()),
            Some(InjectedFailure::PermissionDenied) => Err(ApplicationError::PermissionDenied {
                path: path.to_path_buf(),
                reason,
            }
            .into()),
            Some(InjectedFailure::Io) => Err(ApplicationError::CreateFailed {
                path: path.to_path_buf(),
                reason,
            }
            .into()),
        }
    }

    fn has_parent_dir(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.is_dir(parent),
            _ => true,
        }
    }

    /// Filesystem roots always exist and are never stored.
    fn is_dir(&self, path: &Path) -> bool {
        path.parent().is_none() || self.directories.contains(path)
    }

    fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_dir(path)
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Make every creation at `path` fail with `failure`.
    pub fn fail_on(&self, path: impl Into<PathBuf>, failure: InjectedFailure) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failures.insert(path.into(), failure);
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    pub fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.is_dir(path))
            .unwrap_or(false)
    }

    /// Every directory and file path, sorted.
    pub fn entries(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| {
                inner
                    .directories
                    .iter()
                    .chain(inner.files.keys())
                    .cloned()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn write(&self) -> PrjctResult<std::sync::RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn read(&self) -> PrjctResult<std::sync::RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError.into())
    }

    fn below(root: &Path, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(root).ok()?;
        if rel.as_os_str().is_empty() {
            return None;
        }
        let parts: Vec<_> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(path: &Path, what: &str) -> PrjctError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("{what} does not exist"),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> PrjctResult<()> {
        let mut inner = self.write()?;
        inner.check_injected(path)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if !matches!(component, Component::RootDir | Component::Prefix(_)) {
                inner.directories.insert(current.clone());
            }
        }
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> PrjctResult<()> {
        let mut inner = self.write()?;
        inner.check_injected(path)?;

        if inner.contains(path) {
            return Err(ApplicationError::CreateFailed {
                path: path.to_path_buf(),
                reason: "already exists".into(),
            }
            .into());
        }
        if !inner.has_parent_dir(path) {
            return Err(ApplicationError::CreateFailed {
                path: path.to_path_buf(),
                reason: "parent directory does not exist".into(),
            }
            .into());
        }
        inner.directories.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> PrjctResult<()> {
        let mut inner = self.write()?;
        inner.check_injected(path)?;

        if !inner.has_parent_dir(path) {
            return Err(ApplicationError::CreateFailed {
                path: path.to_path_buf(),
                reason: "parent directory does not exist".into(),
            }
            .into());
        }
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> PrjctResult<()> {
        let content = self
            .read()?
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| not_found(from, "file"))?;
        self.write_file(to, &content)
    }

    fn remove_file(&self, path: &Path) -> PrjctResult<()> {
        let mut inner = self.write()?;
        inner
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path, "file"))
    }

    fn remove_dir(&self, path: &Path) -> PrjctResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "directory"));
        }
        let occupied = inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .any(|p| p != path && p.starts_with(path));
        if occupied {
            return Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "directory not empty".into(),
            }
            .into());
        }
        inner.directories.remove(path);
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> PrjctResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "directory"));
        }
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn list_dirs(&self, root: &Path) -> PrjctResult<Vec<String>> {
        let inner = self.read()?;
        Ok(inner
            .directories
            .iter()
            .filter_map(|p| Self::below(root, p))
            .collect())
    }

    fn list_files(&self, root: &Path) -> PrjctResult<Vec<String>> {
        let inner = self.read()?;
        Ok(inner
            .files
            .keys()
            .filter_map(|p| Self::below(root, p))
            .collect())
    }

    fn is_empty_dir(&self, path: &Path) -> PrjctResult<bool> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(not_found(path, "directory"));
        }
        Ok(!inner
            .directories
            .iter()
            .chain(inner.files.keys())
            .any(|p| p != path && p.starts_with(path)))
    }
}
