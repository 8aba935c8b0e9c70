//! JSON-file stores for the project index and the operation journal.
//!
//! Both files live next to the configuration file. A missing file reads as
//! an empty document; anything unreadable or unparsable is a store error.
//! Writes are pretty-printed with a trailing newline.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use prjct_core::{
    application::{
        ApplicationError,
        ports::{JournalStore, ProjectIndexStore},
    },
    domain::{Journal, ProjectIndex},
    error::PrjctResult,
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

pub const INDEX_FILE_NAME: &str = "projects.json";
pub const JOURNAL_FILE_NAME: &str = "journal.json";

fn store_error(path: &Path, reason: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::StoreError {
        location: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> PrjctResult<T> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "store missing, starting empty");
            return Ok(T::default());
        }
        Err(e) => return Err(store_error(path, format!("cannot read: {e}")).into()),
    };
    serde_json::from_str(&text).map_err(|e| store_error(path, format!("corrupt file: {e}")).into())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> PrjctResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| store_error(path, format!("cannot create directory: {e}")))?;
    }
    let mut text = serde_json::to_string_pretty(value)
        .map_err(|e| store_error(path, format!("cannot serialize: {e}")))?;
    text.push('\n');
    fs::write(path, text).map_err(|e| store_error(path, format!("cannot write: {e}")))?;
    Ok(())
}

// ── Project index ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct JsonProjectIndex {
    path: PathBuf,
}

impl JsonProjectIndex {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Index file inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(INDEX_FILE_NAME))
    }
}

impl ProjectIndexStore for JsonProjectIndex {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> PrjctResult<ProjectIndex> {
        read_json(&self.path)
    }

    #[instrument(skip_all, fields(path = %self.path.display(), projects = index.len()))]
    fn save(&self, index: &ProjectIndex) -> PrjctResult<()> {
        write_json(&self.path, index)
    }
}

// ── Journal ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct JsonJournal {
    path: PathBuf,
}

impl JsonJournal {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(JOURNAL_FILE_NAME))
    }
}

impl JournalStore for JsonJournal {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> PrjctResult<Journal> {
        read_json(&self.path)
    }

    #[instrument(skip_all, fields(path = %self.path.display(), records = journal.len()))]
    fn save(&self, journal: &Journal) -> PrjctResult<()> {
        write_json(&self.path, journal)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
