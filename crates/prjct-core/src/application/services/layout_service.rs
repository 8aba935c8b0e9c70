//! Layout Service - compare, repair, tidy and copy existing project trees.
//!
//! All of these work on the flat, `/`-separated directory lists produced by
//! [`flatten`] and [`Filesystem::list_dirs`], never by re-running creation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Archiver, Filesystem},
    },
    domain::{LayoutDiff, Template, flatten},
    error::PrjctResult,
};

/// Result of [`LayoutService::sync`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Relative paths created (or that would be, on a dry run).
    pub created: Vec<String>,
    /// Relative paths that could not be created, with the reason.
    pub failed: Vec<(String, String)>,
}

impl SyncReport {
    pub fn was_in_sync(&self) -> bool {
        self.created.is_empty() && self.failed.is_empty()
    }
}

/// Result of [`LayoutService::clone_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneReport {
    pub destination: PathBuf,
    /// Includes the destination root.
    pub dirs: usize,
    pub files: usize,
}

/// Result of [`LayoutService::archive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub output: PathBuf,
    pub files: usize,
    /// The project directory was removed after packing.
    pub deleted: bool,
}

pub struct LayoutService {
    filesystem: Box<dyn Filesystem>,
}

impl LayoutService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Template directories (names unresolved) against what exists under `project`.
    #[instrument(skip_all, fields(template = %template.id, project = %project.display()))]
    pub fn diff(&self, template: &Template, project: &Path) -> PrjctResult<LayoutDiff> {
        self.ensure_dir(project)?;
        let actual = self.filesystem.list_dirs(project)?;
        Ok(LayoutDiff::compare(flatten(&template.directories, ""), actual))
    }

    /// Create every template directory missing under `project`. A directory
    /// that cannot be created is reported and skipped.
    #[instrument(skip_all, fields(template = %template.id, project = %project.display()))]
    pub fn sync(
        &self,
        template: &Template,
        project: &Path,
        dry_run: bool,
    ) -> PrjctResult<SyncReport> {
        let diff = self.diff(template, project)?;
        let mut report = SyncReport::default();

        for rel in diff.missing {
            let full = join_relative(project, &rel);
            if dry_run {
                debug!(path = %full.display(), "would create");
                report.created.push(rel);
                continue;
            }
            match self.filesystem.create_dir_all(&full) {
                Ok(()) => {
                    info!(path = %full.display(), "mkdir");
                    report.created.push(rel);
                }
                Err(err) => {
                    warn!(path = %full.display(), error = %err, "cannot create directory");
                    report.failed.push((rel, err.to_string()));
                }
            }
        }
        Ok(report)
    }

    /// Remove empty directories under `project`, deepest first, so a parent
    /// emptied by the removal of its children goes too. `project` itself stays.
    ///
    /// Returns the relative paths removed (or that would be, on a dry run).
    #[instrument(skip_all, fields(project = %project.display()))]
    pub fn clean(&self, project: &Path, dry_run: bool) -> PrjctResult<Vec<String>> {
        self.ensure_dir(project)?;
        let mut dirs = self.filesystem.list_dirs(project)?;
        dirs.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut removed = Vec::new();
        for rel in dirs {
            let full = join_relative(project, &rel);
            match self.filesystem.is_empty_dir(&full) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    debug!(path = %full.display(), error = %err, "cannot inspect, skipping");
                    continue;
                }
            }
            if dry_run {
                removed.push(rel);
                continue;
            }
            match self.filesystem.remove_dir(&full) {
                Ok(()) => {
                    info!(path = %full.display(), "rmdir");
                    removed.push(rel);
                }
                Err(err) => warn!(path = %full.display(), error = %err, "cannot remove directory"),
            }
        }
        Ok(removed)
    }

    /// Copy the directory structure of `source` into `destination`, and the
    /// files too when `with_files` is set.
    #[instrument(skip_all, fields(source = %source.display(), destination = %destination.display()))]
    pub fn clone_tree(
        &self,
        source: &Path,
        destination: &Path,
        with_files: bool,
        dry_run: bool,
    ) -> PrjctResult<CloneReport> {
        self.ensure_dir(source)?;
        if self.filesystem.exists(destination) {
            return Err(ApplicationError::ProjectExists {
                path: destination.to_path_buf(),
            }
            .into());
        }

        let mut dirs = self.filesystem.list_dirs(source)?;
        // Parents sort before their children.
        dirs.sort();
        let files = if with_files {
            self.filesystem.list_files(source)?
        } else {
            Vec::new()
        };

        let report = CloneReport {
            destination: destination.to_path_buf(),
            dirs: dirs.len() + 1,
            files: files.len(),
        };
        if dry_run {
            return Ok(report);
        }

        self.filesystem.create_dir_all(destination)?;
        for rel in &dirs {
            self.filesystem.create_dir_all(&join_relative(destination, rel))?;
        }
        for rel in &files {
            self.filesystem.copy_file(
                &join_relative(source, rel),
                &join_relative(destination, rel),
            )?;
        }

        info!(dirs = report.dirs, files = report.files, "cloned");
        Ok(report)
    }

    /// Pack `project` into a `.tar.gz` at `output`, or `<project>.tar.gz`
    /// next to it, and remove the project afterwards when `delete` is set.
    #[instrument(skip_all, fields(project = %project.display(), delete = delete))]
    pub fn archive(
        &self,
        archiver: &dyn Archiver,
        project: &Path,
        output: Option<&Path>,
        delete: bool,
        dry_run: bool,
    ) -> PrjctResult<ArchiveReport> {
        self.ensure_dir(project)?;
        let output = output.map_or_else(|| default_archive_path(project), Path::to_path_buf);
        if output.starts_with(project) {
            return Err(ApplicationError::FilesystemError {
                path: output,
                reason: "the archive cannot be written inside the project it packs".into(),
            }
            .into());
        }

        if dry_run {
            return Ok(ArchiveReport {
                output,
                files: self.filesystem.list_files(project)?.len(),
                deleted: false,
            });
        }

        let files = archiver.archive(project, &output)?;
        info!(output = %output.display(), files, "archived");

        if delete {
            self.filesystem
                .remove_dir_all(project)
                .map_err(|err| ApplicationError::FilesystemError {
                    path: project.to_path_buf(),
                    reason: format!("archive created but the original was not deleted: {err}"),
                })?;
            info!("removed archived project");
        }

        Ok(ArchiveReport {
            output,
            files,
            deleted: delete,
        })
    }

    fn ensure_dir(&self, path: &Path) -> PrjctResult<()> {
        if self.filesystem.exists(path) {
            Ok(())
        } else {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "directory not found".into(),
            }
            .into())
        }
    }
}

/// `/x/demo` becomes `/x/demo.tar.gz`.
fn default_archive_path(project: &Path) -> PathBuf {
    let mut name = project.as_os_str().to_owned();
    name.push(".tar.gz");
    PathBuf::from(name)
}

/// Join a `/`-separated relative path onto `base` using native separators.
fn join_relative(base: &Path, rel: &str) -> PathBuf {
    rel.split('/')
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |acc, part| acc.join(part))
}
