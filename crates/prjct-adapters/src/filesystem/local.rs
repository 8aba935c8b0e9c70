//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use prjct_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{PrjctError, PrjctResult},
};
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }

    /// Relative `/`-separated paths of every entry below `root` accepted by `keep`.
    fn walk<F>(root: &Path, keep: F) -> PrjctResult<Vec<String>>
    where
        F: Fn(&walkdir::DirEntry) -> bool,
    {
        let mut out = Vec::new();
        for entry in WalkDir::new(root).min_depth(1) {
            let entry = entry.map_err(|e| ApplicationError::FilesystemError {
                path: e.path().unwrap_or(root).to_path_buf(),
                reason: format!("Failed to walk directory: {e}"),
            })?;
            if !keep(&entry) {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(root) {
                let parts: Vec<_> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.push(parts.join("/"));
            }
        }
        Ok(out)
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> PrjctResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_create_error(path, e))
    }

    fn create_dir(&self, path: &Path) -> PrjctResult<()> {
        std::fs::create_dir(path).map_err(|e| map_create_error(path, e))
    }

    fn write_file(&self, path: &Path, content: &str) -> PrjctResult<()> {
        std::fs::write(path, content).map_err(|e| map_create_error(path, e))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> PrjctResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_create_error(to, e))
    }

    fn remove_file(&self, path: &Path) -> PrjctResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn remove_dir(&self, path: &Path) -> PrjctResult<()> {
        std::fs::remove_dir(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_dir_all(&self, path: &Path) -> PrjctResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn list_dirs(&self, root: &Path) -> PrjctResult<Vec<String>> {
        Self::walk(root, |entry| entry.file_type().is_dir())
    }

    fn list_files(&self, root: &Path) -> PrjctResult<Vec<String>> {
        Self::walk(root, |entry| entry.file_type().is_file())
    }

    fn is_empty_dir(&self, path: &Path) -> PrjctResult<bool> {
        let mut entries =
            std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(entries.next().is_none())
    }
}

/// Permission problems are reported separately so the CLI can map them to their own exit code.
fn map_create_error(path: &Path, e: io::Error) -> PrjctError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        ApplicationError::PermissionDenied {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    } else {
        ApplicationError::CreateFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
    .into()
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PrjctError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
