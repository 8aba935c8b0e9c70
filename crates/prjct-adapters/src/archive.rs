//! `.tar.gz` archives of project directories.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::{Compression, write::GzEncoder};
use prjct_core::{
    application::{ApplicationError, ports::Archiver},
    error::{PrjctError, PrjctResult},
};
use tar::Builder;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

/// Gzip-compressed tarball writer. Entries are stored under the project's
/// directory name, so unpacking recreates `<name>/...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarGzArchiver;

impl TarGzArchiver {
    pub fn new() -> Self {
        Self
    }

    fn write(source: &Path, root: &Path, output: &Path) -> io::Result<usize> {
        let file = File::create(output)?;
        let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
        let mut builder = Builder::new(encoder);
        let mut files = 0;

        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry?;
            let rel = entry.path().strip_prefix(source).map_err(io::Error::other)?;
            let name = if rel.as_os_str().is_empty() {
                root.to_path_buf()
            } else {
                root.join(rel)
            };
            let kind = entry.file_type();
            if kind.is_dir() {
                builder.append_dir(&name, entry.path())?;
            } else if kind.is_file() {
                builder.append_path_with_name(entry.path(), &name)?;
                files += 1;
            } else {
                debug!(path = %entry.path().display(), "skipping non-regular entry");
            }
        }

        builder.into_inner()?.finish()?.flush()?;
        Ok(files)
    }
}

impl Archiver for TarGzArchiver {
    #[instrument(skip_all, fields(source = %source.display(), output = %output.display()))]
    fn archive(&self, source: &Path, output: &Path) -> PrjctResult<usize> {
        let root = source.file_name().ok_or_else(|| ApplicationError::FilesystemError {
            path: source.to_path_buf(),
            reason: "project path has no directory name".into(),
        })?;

        Self::write(source, Path::new(root), output).map_err(|err| {
            if let Err(cleanup) = fs::remove_file(output) {
                warn!(error = %cleanup, "cannot remove partial archive");
            }
            archive_error(output, err)
        })
    }
}

fn archive_error(output: &Path, err: io::Error) -> PrjctError {
    ApplicationError::FilesystemError {
        path: output.to_path_buf(),
        reason: format!("Failed to write archive: {err}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use flate2::read::GzDecoder;
    use tempfile::TempDir;

    use super::*;

    fn entry_names(archive: &Path) -> Vec<String> {
        let mut archive = tar::Archive::new(GzDecoder::new(File::open(archive).unwrap()));
        let mut names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| {
                let e = e.unwrap();
                let path = e.path().unwrap().to_string_lossy().into_owned();
                path.trim_end_matches('/').to_string()
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn packs_tree_under_project_name() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("demo");
        fs::create_dir_all(project.join("src/bin")).unwrap();
        fs::create_dir_all(project.join("docs")).unwrap();
        fs::write(project.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(project.join("README.md"), "# demo").unwrap();
        let output = temp.path().join("demo.tar.gz");

        let files = TarGzArchiver::new().archive(&project, &output).unwrap();

        assert_eq!(files, 2);
        assert_eq!(
            entry_names(&output),
            [
                "demo",
                "demo/README.md",
                "demo/docs",
                "demo/src",
                "demo/src/bin",
                "demo/src/main.rs"
            ]
        );
    }

    #[test]
    fn file_contents_survive() {
        let temp = TempDir::new().unwrap();
        let project = temp.path().join("notes");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("todo.txt"), "ship it").unwrap();
        let output = temp.path().join("notes.tar.gz");
        TarGzArchiver::new().archive(&project, &output).unwrap();

        let unpacked = temp.path().join("out");
        tar::Archive::new(GzDecoder::new(File::open(&output).unwrap()))
            .unpack(&unpacked)
            .unwrap();
        assert_eq!(
            fs::read_to_string(unpacked.join("notes/todo.txt")).unwrap(),
            "ship it"
        );
    }

    #[test]
    fn missing_source_leaves_no_partial_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("ghost.tar.gz");

        let err = TarGzArchiver::new()
            .archive(&temp.path().join("ghost"), &output)
            .unwrap_err();

        assert!(err.to_string().contains("archive"));
        assert!(!output.exists());
    }
}
