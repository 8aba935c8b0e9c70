//! Index Service - the persisted list of projects prjct has created.

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::ProjectIndexStore},
    domain::{DEFAULT_FUZZY_DISTANCE, ProjectEntry, ProjectIndex, filter_by_template},
    error::PrjctResult,
};

/// How [`IndexService::search`] should match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub template: Option<String>,
    pub fuzzy: bool,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }
}

pub struct IndexService {
    store: Box<dyn ProjectIndexStore>,
}

impl IndexService {
    pub fn new(store: Box<dyn ProjectIndexStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> PrjctResult<ProjectIndex> {
        self.store.load()
    }

    /// Track `entry`. Already tracked paths are left untouched and `false` is returned.
    #[instrument(skip_all, fields(path = %entry.path))]
    pub fn add(&self, entry: ProjectEntry) -> PrjctResult<bool> {
        let mut index = self.store.load()?;
        if !index.add(entry) {
            debug!("already tracked");
            return Ok(false);
        }
        self.store.save(&index)?;
        Ok(true)
    }

    pub fn remove(&self, path: &str) -> PrjctResult<bool> {
        let mut index = self.store.load()?;
        let removed = index.remove(path);
        if removed {
            self.store.save(&index)?;
        }
        Ok(removed)
    }

    pub fn update<F>(&self, path: &str, f: F) -> PrjctResult<bool>
    where
        F: FnOnce(&mut ProjectEntry),
    {
        let mut index = self.store.load()?;
        let updated = index.update(path, f);
        if updated {
            self.store.save(&index)?;
        }
        Ok(updated)
    }

    pub fn search(&self, query: &SearchQuery) -> PrjctResult<Vec<ProjectEntry>> {
        let index = self.store.load()?;
        let hits = if query.fuzzy {
            index.fuzzy_search(&query.text, DEFAULT_FUZZY_DISTANCE)
        } else {
            index.search(&query.text)
        };
        let hits = match &query.template {
            Some(template) => filter_by_template(hits, template),
            None => hits,
        };
        Ok(hits.into_iter().cloned().collect())
    }

    pub fn recent(&self, limit: usize) -> PrjctResult<Vec<ProjectEntry>> {
        Ok(self
            .store
            .load()?
            .recent(limit)
            .into_iter()
            .cloned()
            .collect())
    }

    /// First substring match for `query`, as used by sync, clone and clean.
    pub fn find_first(&self, query: &str) -> PrjctResult<ProjectEntry> {
        self.store
            .load()?
            .search(query)
            .first()
            .map(|e| (*e).clone())
            .ok_or_else(|| {
                ApplicationError::ProjectNotFound {
                    query: query.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::application::ports::MockProjectIndexStore;
    use crate::error::ErrorCategory;

    fn entry(name: &str, template: &str, day: u32) -> ProjectEntry {
        ProjectEntry::new(
            name,
            template,
            template.to_uppercase(),
            format!("/p/{name}"),
            Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        )
    }

    /// A mock store backed by a shared index, counting saves.
    fn store(initial: ProjectIndex) -> (MockProjectIndexStore, Arc<Mutex<ProjectIndex>>) {
        let shared = Arc::new(Mutex::new(initial));
        let mut store = MockProjectIndexStore::new();
        let read = Arc::clone(&shared);
        store
            .expect_load()
            .returning(move || Ok(read.lock().unwrap().clone()));
        let write = Arc::clone(&shared);
        store.expect_save().returning(move |idx| {
            *write.lock().unwrap() = idx.clone();
            Ok(())
        });
        (store, shared)
    }

    fn sample() -> ProjectIndex {
        ProjectIndex::new(vec![
            entry("alpha", "dev", 1),
            entry("beta", "video", 3),
            entry("gamma", "dev", 2),
        ])
    }

    #[test]
    fn add_persists_new_entries_only() {
        let (store, shared) = store(sample());
        let service = IndexService::new(Box::new(store));

        assert!(service.add(entry("delta", "dev", 4)).unwrap());
        assert!(!service.add(entry("alpha", "dev", 9)).unwrap());
        assert_eq!(shared.lock().unwrap().len(), 4);
    }

    #[test]
    fn remove_without_match_does_not_save() {
        let mut store = MockProjectIndexStore::new();
        store.expect_load().returning(|| Ok(sample()));
        store.expect_save().never();

        let service = IndexService::new(Box::new(store));
        assert!(!service.remove("/p/none").unwrap());
    }

    #[test]
    fn update_changes_status() {
        let (store, shared) = store(sample());
        let service = IndexService::new(Box::new(store));

        assert!(
            service
                .update("/p/beta", |e| e.status = Some("done".into()))
                .unwrap()
        );
        assert_eq!(
            shared.lock().unwrap().projects[1].status.as_deref(),
            Some("done")
        );
    }

    #[test]
    fn search_with_template_filter_and_fuzzy() {
        let (store, _) = store(sample());
        let service = IndexService::new(Box::new(store));

        let dev = service.search(&SearchQuery::new("").template("dev")).unwrap();
        assert_eq!(dev.len(), 2);

        let typo = service.search(&SearchQuery::new("gamam").fuzzy(true)).unwrap();
        assert_eq!(typo.len(), 1);
        assert_eq!(typo[0].name, "gamma");

        assert!(service.search(&SearchQuery::new("gamam")).unwrap().is_empty());
    }

    #[test]
    fn recent_orders_by_creation() {
        let (store, _) = store(sample());
        let service = IndexService::new(Box::new(store));
        let names: Vec<_> = service
            .recent(2)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, ["beta", "gamma"]);
    }

    #[test]
    fn find_first_reports_missing_projects() {
        let (store, _) = store(sample());
        let service = IndexService::new(Box::new(store));

        assert_eq!(service.find_first("BET").unwrap().name, "beta");
        assert_eq!(
            service.find_first("zzz").unwrap_err().category(),
            ErrorCategory::NotFound
        );
    }
}
