//! Tracked projects and the queries run against them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default edit distance tolerated by [`ProjectIndex::fuzzy_search`].
pub const DEFAULT_FUZZY_DISTANCE: usize = 2;

/// One project created (or cloned) by prjct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub template_id: String,
    pub template_name: String,
    pub path: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ProjectEntry {
    pub fn new(
        name: impl Into<String>,
        template_id: impl Into<String>,
        template_name: impl Into<String>,
        path: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            template_id: template_id.into(),
            template_name: template_name.into(),
            path: path.into(),
            created_at,
            status: None,
            notes: Vec::new(),
        }
    }

    fn matches_substring(&self, needle: &str) -> bool {
        [
            &self.name,
            &self.template_id,
            &self.template_name,
            &self.path,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }

    fn matches_fuzzy(&self, needle: &str, max_distance: usize) -> bool {
        [&self.name, &self.template_id, &self.template_name]
            .iter()
            .map(|field| field.to_lowercase())
            .any(|field| {
                levenshtein(needle, &field) <= max_distance
                    || contains_fuzzy(&field, needle, max_distance)
            })
    }
}

/// The whole project index document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIndex {
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

impl ProjectIndex {
    pub fn new(projects: Vec<ProjectEntry>) -> Self {
        Self { projects }
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn find_by_path(&self, path: &str) -> Option<&ProjectEntry> {
        self.projects.iter().find(|e| e.path == path)
    }

    /// Append `entry` unless its path is already tracked. Returns whether it was added.
    pub fn add(&mut self, entry: ProjectEntry) -> bool {
        if self.find_by_path(&entry.path).is_some() {
            return false;
        }
        self.projects.push(entry);
        true
    }

    /// Drop every entry at `path`. Returns whether anything was removed.
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|e| e.path != path);
        self.projects.len() != before
    }

    /// Apply `f` to the first entry at `path`. Returns whether one matched.
    pub fn update<F>(&mut self, path: &str, f: F) -> bool
    where
        F: FnOnce(&mut ProjectEntry),
    {
        match self.projects.iter_mut().find(|e| e.path == path) {
            Some(entry) => {
                f(entry);
                true
            }
            None => false,
        }
    }

    /// Case-insensitive substring match on name, template id, template name
    /// and path. An empty query returns everything.
    pub fn search(&self, query: &str) -> Vec<&ProjectEntry> {
        if query.is_empty() {
            return self.projects.iter().collect();
        }
        let needle = query.to_lowercase();
        self.projects
            .iter()
            .filter(|e| e.matches_substring(&needle))
            .collect()
    }

    /// Substring search first; only when that finds nothing, fall back to
    /// edit distance on name, template id and template name.
    pub fn fuzzy_search(&self, query: &str, max_distance: usize) -> Vec<&ProjectEntry> {
        let exact = self.search(query);
        if !exact.is_empty() || query.is_empty() {
            return exact;
        }
        let needle = query.to_lowercase();
        self.projects
            .iter()
            .filter(|e| e.matches_fuzzy(&needle, max_distance))
            .collect()
    }

    /// Newest first, at most `limit` entries (0 means no limit).
    pub fn recent(&self, limit: usize) -> Vec<&ProjectEntry> {
        let mut entries: Vec<&ProjectEntry> = self.projects.iter().collect();
        sort_newest_first(&mut entries);
        if limit > 0 {
            entries.truncate(limit);
        }
        entries
    }
}

pub fn filter_by_template<'a>(
    entries: impl IntoIterator<Item = &'a ProjectEntry>,
    template_id: &str,
) -> Vec<&'a ProjectEntry> {
    entries
        .into_iter()
        .filter(|e| e.template_id == template_id)
        .collect()
}

pub fn sort_newest_first(entries: &mut [&ProjectEntry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Edit distance between `a` and `b`, counted in chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Whether some window of `haystack` about as long as `needle` is within
/// `max_distance` edits of it.
fn contains_fuzzy(haystack: &str, needle: &str, max_distance: usize) -> bool {
    let hay: Vec<char> = haystack.chars().collect();
    let needle_len = needle.chars().count();
    if needle_len > hay.len() + max_distance {
        return false;
    }

    let last_start = (hay.len() + max_distance).saturating_sub(needle_len);
    (0..hay.len().min(last_start + 1)).any(|start| {
        let end = (start + needle_len + max_distance).min(hay.len());
        let window: String = hay[start..end].iter().collect();
        levenshtein(needle, &window) <= max_distance
    })
}
