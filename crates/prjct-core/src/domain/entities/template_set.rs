//! The configuration document: every template known to one invocation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::template::{Template, Variable};
use crate::domain::{
    error::DomainError,
    validation::{self, ValidationIssue},
};

/// Root of the YAML configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TemplateSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    #[serde(default)]
    pub templates: Vec<Template>,
}

impl TemplateSet {
    pub fn new(templates: Vec<Template>) -> Self {
        Self {
            editor: None,
            templates,
        }
    }

    /// Look up a template by id without resolving inheritance.
    pub fn find(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.id.as_str()).collect()
    }

    /// Templates carrying at least one of `tags`; all templates for an empty filter.
    pub fn filter_by_tags<'a, S: AsRef<str>>(
        &'a self,
        tags: &'a [S],
    ) -> impl Iterator<Item = &'a Template> + 'a {
        self.templates.iter().filter(move |t| t.matches_tags(tags))
    }

    /// Every semantic issue in the document, in document order.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validation::validate_template_set(self)
    }

    /// Return the fully merged template for `id`.
    ///
    /// The result owns all of its data: mutating it never touches the set.
    /// Along the `extends` chain, processed oldest ancestor first:
    /// - `id`, `name`, `base_path` take the latest non-empty value
    /// - `directories` and `hooks` are concatenated, ancestors first
    /// - `variables` are overridden by name, new names appended
    pub fn resolve(&self, id: &str) -> Result<Template, DomainError> {
        let template = self
            .find(id)
            .ok_or_else(|| DomainError::TemplateNotFound { id: id.to_string() })?;

        if template.parent_id().is_none() {
            return Ok(template.clone());
        }

        let chain = self.inheritance_chain(template)?;

        let mut merged = Template::default();
        for ancestor in chain.iter().rev() {
            overlay(&mut merged, ancestor);
        }
        Ok(merged)
    }

    /// `template` followed by its ancestors, nearest first.
    fn inheritance_chain<'a>(
        &'a self,
        template: &'a Template,
    ) -> Result<Vec<&'a Template>, DomainError> {
        let mut chain = vec![template];
        let mut visited: HashSet<&str> = HashSet::from([template.id.as_str()]);
        let mut current = template.parent_id();

        while let Some(parent_id) = current {
            if !visited.insert(parent_id) {
                return Err(DomainError::CircularInheritance {
                    id: parent_id.to_string(),
                });
            }
            let parent = self
                .find(parent_id)
                .ok_or_else(|| DomainError::ParentTemplateNotFound {
                    id: parent_id.to_string(),
                })?;
            chain.push(parent);
            current = parent.parent_id();
        }

        Ok(chain)
    }
}

fn overlay(merged: &mut Template, layer: &Template) {
    if !layer.id.is_empty() {
        merged.id.clone_from(&layer.id);
    }
    if !layer.name.is_empty() {
        merged.name.clone_from(&layer.name);
    }
    if !layer.base_path.is_empty() {
        merged.base_path.clone_from(&layer.base_path);
    }
    merged.directories.extend(layer.directories.iter().cloned());
    merged.hooks.extend(layer.hooks.iter().cloned());
    for variable in &layer.variables {
        override_variable(&mut merged.variables, variable);
    }
}

fn override_variable(variables: &mut Vec<Variable>, variable: &Variable) {
    match variables.iter_mut().find(|v| v.name == variable.name) {
        Some(existing) => *existing = variable.clone(),
        None => variables.push(variable.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::template::Directory;

    fn base() -> Template {
        Template::new("base", "Base", "~/Projects")
            .with_directory(Directory::new("docs"))
            .with_hook("git init")
            .with_variable(Variable::new("env").with_default("dev"))
            .with_tag("shared")
    }

    #[test]
    fn resolve_without_extends_returns_copy() {
        let set = TemplateSet::new(vec![base()]);
        let mut resolved = set.resolve("base").unwrap();
        resolved.name = "Changed".into();
        resolved.directories.clear();

        let stored = set.find("base").unwrap();
        assert_eq!(stored.name, "Base");
        assert_eq!(stored.directories.len(), 1);
    }

    #[test]
    fn resolve_unknown_id() {
        let set = TemplateSet::new(vec![base()]);
        assert_eq!(
            set.resolve("nope"),
            Err(DomainError::TemplateNotFound { id: "nope".into() })
        );
    }

    #[test]
    fn child_with_empty_fields_keeps_inherited_values() {
        let child = Template::new("child", "", "").extending("base");
        let set = TemplateSet::new(vec![base(), child]);

        let resolved = set.resolve("child").unwrap();
        assert_eq!(resolved.id, "child");
        assert_eq!(resolved.name, "Base");
        assert_eq!(resolved.base_path, "~/Projects");
        assert_eq!(resolved.parent_id(), None);
    }

    #[test]
    fn child_non_empty_fields_win() {
        let child = Template::new("child", "Child", "/srv").extending("base");
        let set = TemplateSet::new(vec![base(), child]);

        let resolved = set.resolve("child").unwrap();
        assert_eq!(resolved.name, "Child");
        assert_eq!(resolved.base_path, "/srv");
    }

    #[test]
    fn directories_and_hooks_concatenate_ancestor_first() {
        let child = Template::new("child", "Child", "")
            .extending("base")
            .with_directory(Directory::new("src"))
            .with_hook("make");
        let set = TemplateSet::new(vec![child, base()]);

        let resolved = set.resolve("child").unwrap();
        let names: Vec<_> = resolved.directories.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["docs", "src"]);
        assert_eq!(resolved.hooks, ["git init", "make"]);
    }

    #[test]
    fn variables_override_by_name() {
        let child = Template::new("child", "Child", "")
            .extending("base")
            .with_variable(Variable::new("env").with_default("prod"))
            .with_variable(Variable::new("region"));
        let set = TemplateSet::new(vec![base(), child]);

        let resolved = set.resolve("child").unwrap();
        assert_eq!(resolved.variables.len(), 2);
        assert_eq!(resolved.variables[0].name, "env");
        assert_eq!(resolved.variables[0].default, "prod");
        assert_eq!(resolved.variables[1].name, "region");
    }

    #[test]
    fn three_level_chain_merges_in_order() {
        let mid = Template::new("mid", "Mid", "")
            .extending("base")
            .with_directory(Directory::new("mid"));
        let leaf = Template::new("leaf", "", "")
            .extending("mid")
            .with_directory(Directory::new("leaf"));
        let set = TemplateSet::new(vec![leaf, mid, base()]);

        let resolved = set.resolve("leaf").unwrap();
        let names: Vec<_> = resolved.directories.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["docs", "mid", "leaf"]);
        assert_eq!(resolved.name, "Mid");
        assert_eq!(resolved.id, "leaf");
    }

    #[test]
    fn resolve_detects_cycles() {
        let a = Template::new("a", "A", "~").extending("b");
        let b = Template::new("b", "B", "~").extending("a");
        let set = TemplateSet::new(vec![a, b]);

        assert_eq!(
            set.resolve("a"),
            Err(DomainError::CircularInheritance { id: "a".into() })
        );
    }

    #[test]
    fn resolve_reports_missing_parent() {
        let child = Template::new("child", "Child", "~").extending("ghost");
        let set = TemplateSet::new(vec![child]);

        assert_eq!(
            set.resolve("child"),
            Err(DomainError::ParentTemplateNotFound { id: "ghost".into() })
        );
    }

    #[test]
    fn filter_by_tags_keeps_matching_templates() {
        let other = Template::new("photo", "Photo", "~").with_tag("media");
        let set = TemplateSet::new(vec![base(), other]);

        let ids: Vec<_> = set.filter_by_tags(&["MEDIA"]).map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["photo"]);
        assert_eq!(set.filter_by_tags::<&str>(&[]).count(), 2);
    }
}
