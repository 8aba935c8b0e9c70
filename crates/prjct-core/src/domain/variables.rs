//! Template variables and `{key}` placeholder substitution.
//!
//! Substitution is flat: `{key}` is replaced by the value of `key`, unknown
//! placeholders stay verbatim, and substituted values are never re-scanned.

use std::collections::BTreeMap;

use chrono::Datelike;

/// The variable set available while materializing a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in variables for a project: `name`, `date` (YYYY-MM-DD), `year`,
    /// `month` and `day`, all derived from the caller's `now`.
    pub fn builtin(project_name: &str, now: &impl Datelike) -> Self {
        let (year, month, day) = (now.year(), now.month(), now.day());
        [
            ("name", project_name.to_string()),
            ("date", format!("{year:04}-{month:02}-{day:02}")),
            ("year", format!("{year:04}")),
            ("month", format!("{month:02}")),
            ("day", format!("{day:02}")),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every `{key}` whose key is defined; leave the rest untouched.
    pub fn resolve(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];

            match after_open.find(['{', '}']) {
                Some(close) if after_open.as_bytes()[close] == b'}' => {
                    let key = &after_open[..close];
                    match self.values.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push('{');
                            out.push_str(key);
                            out.push('}');
                        }
                    }
                    rest = &after_open[close + 1..];
                }
                // Another `{` before any `}`: this brace is literal.
                Some(_) | None => {
                    out.push('{');
                    rest = after_open;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Variables {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn builtin_values_are_zero_padded() {
        let vars = Variables::builtin("Demo", &date(2024, 3, 7));
        assert_eq!(vars.get("name"), Some("Demo"));
        assert_eq!(vars.get("date"), Some("2024-03-07"));
        assert_eq!(vars.get("year"), Some("2024"));
        assert_eq!(vars.get("month"), Some("03"));
        assert_eq!(vars.get("day"), Some("07"));
        assert_eq!(vars.len(), 5);
    }

    #[test]
    fn resolve_replaces_every_occurrence() {
        let vars = Variables::new().with("name", "Acme");
        assert_eq!(vars.resolve("{name}/{name}.md"), "Acme/Acme.md");
    }

    #[test]
    fn resolve_leaves_unknown_placeholders() {
        assert_eq!(Variables::new().resolve("{missing}"), "{missing}");
        let vars = Variables::new().with("a", "1");
        assert_eq!(vars.resolve("{a}-{b}"), "1-{b}");
    }

    #[test]
    fn resolve_handles_stray_braces() {
        let vars = Variables::new().with("a", "1");
        assert_eq!(vars.resolve("{"), "{");
        assert_eq!(vars.resolve("}{a}"), "}1");
        assert_eq!(vars.resolve("{{a}}"), "{1}");
        assert_eq!(vars.resolve("fn main() {}"), "fn main() {}");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let vars = Variables::new().with("a", "{b}").with("b", "x");
        assert_eq!(vars.resolve("{a}"), "{b}");
    }

    #[test]
    fn empty_key_only_matches_when_defined() {
        assert_eq!(Variables::new().resolve("{}"), "{}");
        assert_eq!(Variables::new().with("", "e").resolve("{}"), "e");
    }

    #[test]
    fn resolve_preserves_unicode() {
        let vars = Variables::new().with("name", "プロジェクト");
        assert_eq!(vars.resolve("📁 {name} ✓"), "📁 プロジェクト ✓");
    }

    #[test]
    fn later_insert_overrides() {
        let mut vars = Variables::builtin("a", &date(2024, 1, 1));
        vars.extend([("name", "b")]);
        assert_eq!(vars.get("name"), Some("b"));
    }
}
