//! History Service - the operation journal and `undo`.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, JournalStore},
        services::IndexService,
    },
    domain::OperationRecord,
    error::PrjctResult,
};

/// What `undo` did, or would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    NothingToUndo,
    /// Dry run: the record that would be reverted.
    Preview(OperationRecord),
    Reverted {
        record: OperationRecord,
        removed: PathBuf,
    },
    /// Sync and clean cannot be reversed automatically. The record is kept.
    NotUndoable(OperationRecord),
}

pub struct HistoryService {
    journal: Box<dyn JournalStore>,
}

impl HistoryService {
    pub fn new(journal: Box<dyn JournalStore>) -> Self {
        Self { journal }
    }

    /// Append `record`, dropping the oldest ones beyond the journal capacity.
    #[instrument(skip_all, fields(operation = %record.operation))]
    pub fn record(&self, record: OperationRecord) -> PrjctResult<()> {
        let mut journal = self.journal.load()?;
        journal.append(record);
        self.journal.save(&journal)
    }

    pub fn last(&self) -> PrjctResult<Option<OperationRecord>> {
        Ok(self.journal.load()?.last().cloned())
    }

    pub fn remove_last(&self) -> PrjctResult<Option<OperationRecord>> {
        let mut journal = self.journal.load()?;
        let removed = journal.remove_last();
        if removed.is_some() {
            self.journal.save(&journal)?;
        }
        Ok(removed)
    }

    /// Reverse the most recent create or clone: delete the project directory,
    /// forget it in the index and drop the record.
    #[instrument(skip_all, fields(dry_run = dry_run))]
    pub fn undo(
        &self,
        filesystem: &dyn Filesystem,
        index: &IndexService,
        dry_run: bool,
    ) -> PrjctResult<UndoOutcome> {
        let Some(record) = self.last()? else {
            return Ok(UndoOutcome::NothingToUndo);
        };

        if dry_run {
            return Ok(UndoOutcome::Preview(record));
        }
        if !record.operation.is_undoable() {
            return Ok(UndoOutcome::NotUndoable(record));
        }

        let path = record
            .detail("path")
            .ok_or_else(|| ApplicationError::StoreError {
                location: "journal".into(),
                reason: format!("{} record is missing its path", record.operation),
            })?
            .to_string();

        if filesystem.exists(Path::new(&path)) {
            filesystem.remove_dir_all(Path::new(&path))?;
            info!(path = %path, "removed project directory");
        } else {
            warn!(path = %path, "project directory already gone");
        }

        if let Err(err) = index.remove(&path) {
            warn!(error = %err, "cannot update project index");
        }
        self.remove_last()?;

        Ok(UndoOutcome::Reverted {
            record,
            removed: PathBuf::from(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::application::ports::{MockFilesystem, MockJournalStore, MockProjectIndexStore};
    use crate::domain::{Journal, OperationKind, ProjectEntry, ProjectIndex};

    fn at(n: i64) -> chrono::DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + n, 0).unwrap()
    }

    fn journal_store(initial: Journal) -> (MockJournalStore, Arc<Mutex<Journal>>) {
        let shared = Arc::new(Mutex::new(initial));
        let mut store = MockJournalStore::new();
        let read = Arc::clone(&shared);
        store
            .expect_load()
            .returning(move || Ok(read.lock().unwrap().clone()));
        let write = Arc::clone(&shared);
        store.expect_save().returning(move |j| {
            *write.lock().unwrap() = j.clone();
            Ok(())
        });
        (store, shared)
    }

    fn index_with(path: &str) -> (IndexService, Arc<Mutex<ProjectIndex>>) {
        let shared = Arc::new(Mutex::new(ProjectIndex::new(vec![ProjectEntry::new(
            "demo", "dev", "Dev", path, at(0),
        )])));
        let mut store = MockProjectIndexStore::new();
        let read = Arc::clone(&shared);
        store
            .expect_load()
            .returning(move || Ok(read.lock().unwrap().clone()));
        let write = Arc::clone(&shared);
        store.expect_save().returning(move |i| {
            *write.lock().unwrap() = i.clone();
            Ok(())
        });
        (IndexService::new(Box::new(store)), shared)
    }

    fn create_record(path: &str) -> OperationRecord {
        OperationRecord::new(OperationKind::Create, at(1))
            .with_detail("path", path)
            .with_detail("template", "dev")
    }

    #[test]
    fn record_appends() {
        let (store, shared) = journal_store(Journal::default());
        let history = HistoryService::new(Box::new(store));

        history.record(create_record("/p/a")).unwrap();
        history.record(create_record("/p/b")).unwrap();

        assert_eq!(shared.lock().unwrap().len(), 2);
        assert_eq!(history.last().unwrap().unwrap().detail("path"), Some("/p/b"));
    }

    #[test]
    fn undo_on_empty_journal() {
        let (store, _) = journal_store(Journal::default());
        let (index, _) = index_with("/p/demo");
        let fs = MockFilesystem::new();

        let outcome = HistoryService::new(Box::new(store))
            .undo(&fs, &index, false)
            .unwrap();
        assert_eq!(outcome, UndoOutcome::NothingToUndo);
    }

    #[test]
    fn undo_removes_directory_index_entry_and_record() {
        let mut journal = Journal::default();
        journal.append(create_record("/p/demo"));
        let (store, shared_journal) = journal_store(journal);
        let (index, shared_index) = index_with("/p/demo");

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_dir_all()
            .withf(|p| p == Path::new("/p/demo"))
            .times(1)
            .returning(|_| Ok(()));

        let outcome = HistoryService::new(Box::new(store))
            .undo(&fs, &index, false)
            .unwrap();

        assert!(matches!(outcome, UndoOutcome::Reverted { .. }));
        assert!(shared_index.lock().unwrap().is_empty());
        assert!(shared_journal.lock().unwrap().is_empty());
    }

    #[test]
    fn undo_of_deleted_project_still_clears_index_and_record() {
        let mut journal = Journal::default();
        journal.append(create_record("/p/demo"));
        let (store, shared_journal) = journal_store(journal);
        let (index, shared_index) = index_with("/p/demo");

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_remove_dir_all().never();

        let history = HistoryService::new(Box::new(store));
        let outcome = history.undo(&fs, &index, false).unwrap();

        assert!(matches!(outcome, UndoOutcome::Reverted { .. }));
        assert!(shared_index.lock().unwrap().is_empty());
        assert!(shared_journal.lock().unwrap().is_empty());
        assert_eq!(history.undo(&fs, &index, false).unwrap(), UndoOutcome::NothingToUndo);
    }

    #[test]
    fn dry_run_only_previews() {
        let mut journal = Journal::default();
        journal.append(create_record("/p/demo"));
        let (store, shared) = journal_store(journal);
        let (index, _) = index_with("/p/demo");
        let mut fs = MockFilesystem::new();
        fs.expect_remove_dir_all().never();

        let outcome = HistoryService::new(Box::new(store))
            .undo(&fs, &index, true)
            .unwrap();

        assert!(matches!(outcome, UndoOutcome::Preview(_)));
        assert_eq!(shared.lock().unwrap().len(), 1);
    }

    #[test]
    fn sync_is_not_undoable() {
        let mut journal = Journal::default();
        journal.append(OperationRecord::new(OperationKind::Sync, at(2)).with_detail("path", "/p"));
        let (store, shared) = journal_store(journal);
        let (index, _) = index_with("/p/demo");
        let mut fs = MockFilesystem::new();
        fs.expect_remove_dir_all().never();

        let outcome = HistoryService::new(Box::new(store))
            .undo(&fs, &index, false)
            .unwrap();

        assert!(matches!(outcome, UndoOutcome::NotUndoable(_)));
        assert_eq!(shared.lock().unwrap().len(), 1);
    }

    #[test]
    fn record_without_path_is_an_error() {
        let mut journal = Journal::default();
        journal.append(OperationRecord::new(OperationKind::Clone, at(3)));
        let (store, _) = journal_store(journal);
        let (index, _) = index_with("/p/demo");

        let result = HistoryService::new(Box::new(store)).undo(&MockFilesystem::new(), &index, false);
        assert!(result.is_err());
    }
}
