//! Bounded log of recent operations, used by `undo`.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Records kept after an append; older ones are dropped.
pub const JOURNAL_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Clone,
    Sync,
    Clean,
}

impl OperationKind {
    /// Create and clone leave a whole new directory behind, which can be removed again.
    pub fn is_undoable(self) -> bool {
        matches!(self, Self::Create | Self::Clone)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Clone => "clone",
            Self::Sync => "sync",
            Self::Clean => "clean",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub timestamp: DateTime<Utc>,
    pub operation: OperationKind,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
}

impl OperationRecord {
    pub fn new(operation: OperationKind, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            operation,
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn detail(&self, key: &str) -> Option<&str> {
        self.details
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    pub records: Vec<OperationRecord>,
}

impl Journal {
    pub fn append(&mut self, record: OperationRecord) {
        self.records.push(record);
        if self.records.len() > JOURNAL_CAPACITY {
            let excess = self.records.len() - JOURNAL_CAPACITY;
            self.records.drain(..excess);
        }
    }

    pub fn last(&self) -> Option<&OperationRecord> {
        self.records.last()
    }

    pub fn remove_last(&mut self) -> Option<OperationRecord> {
        self.records.pop()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(n: i64) -> OperationRecord {
        OperationRecord::new(
            OperationKind::Create,
            Utc.timestamp_opt(1_700_000_000 + n, 0).unwrap(),
        )
        .with_detail("path", format!("/p/{n}"))
    }

    #[test]
    fn append_keeps_the_newest_records() {
        let mut journal = Journal::default();
        for n in 0..105 {
            journal.append(record(n));
        }
        assert_eq!(journal.len(), JOURNAL_CAPACITY);
        assert_eq!(journal.records[0].detail("path"), Some("/p/5"));
        assert_eq!(journal.last().unwrap().detail("path"), Some("/p/104"));
    }

    #[test]
    fn remove_last_pops() {
        let mut journal = Journal::default();
        assert!(journal.remove_last().is_none());
        journal.append(record(1));
        journal.append(record(2));
        assert_eq!(journal.remove_last().unwrap().detail("path"), Some("/p/2"));
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn empty_detail_reads_as_missing() {
        let rec = record(0).with_detail("name", "");
        assert_eq!(rec.detail("name"), None);
        assert_eq!(rec.detail("absent"), None);
    }

    #[test]
    fn only_create_and_clone_are_undoable() {
        assert!(OperationKind::Create.is_undoable());
        assert!(OperationKind::Clone.is_undoable());
        assert!(!OperationKind::Sync.is_undoable());
        assert!(!OperationKind::Clean.is_undoable());
    }

    #[test]
    fn operation_kind_serializes_lowercase() {
        let doc = serde_yaml::to_string(&OperationKind::Clone).unwrap();
        assert_eq!(doc.trim(), "clone");
    }
}
