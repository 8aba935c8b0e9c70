//! Template domain model.
//!
//! A [`Template`] describes a project's directory tree declaratively. It is
//! loaded from the YAML configuration, validated once, and then either used
//! as-is or merged along its `extends` chain by
//! [`TemplateSet::resolve`](super::template_set::TemplateSet::resolve).
//!
//! ```text
//! Template
//! ├── id / name / base_path / tags
//! ├── variables: Vec<Variable>      {name, prompt, default}
//! ├── hooks: Vec<String>            run after creation, inside the project
//! ├── extends: Option<String>       parent template id
//! └── directories: Vec<Directory>
//!      ├── name ("{var}" placeholders allowed)
//!      ├── optional / when
//!      ├── files: Vec<FileTemplate> {name, content}
//!      └── children: Vec<Directory>
//! ```
//!
//! Field names follow the YAML document (`base_path`, `children`, ...). Empty
//! collections and unset flags are omitted when serialising so a saved
//! document stays close to what a person would write by hand.

use serde::{Deserialize, Serialize};

/// A file created as a leaf inside a [`Directory`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileTemplate {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub content: String,
}

impl FileTemplate {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A user-facing variable with an optional prompt and default value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// The text shown when asking for this variable interactively.
    pub fn prompt_text(&self) -> &str {
        if self.prompt.is_empty() {
            &self.name
        } else {
            &self.prompt
        }
    }
}

/// A node in a template tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Directory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Directory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileTemplate>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub when: String,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_child(mut self, child: Directory) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_file(mut self, file: FileTemplate) -> Self {
        self.files.push(file);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.when = condition.into();
        self
    }
}

/// A declarative project template.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub base_path: String,
    #[serde(default)]
    pub directories: Vec<Directory>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hooks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Template {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    pub fn with_directory(mut self, directory: Directory) -> Self {
        self.directories.push(directory);
        self
    }

    pub fn with_hook(mut self, hook: impl Into<String>) -> Self {
        self.hooks.push(hook.into());
        self
    }

    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn extending(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Parent template id, treating an empty `extends` as absent.
    pub fn parent_id(&self) -> Option<&str> {
        self.extends.as_deref().filter(|p| !p.is_empty())
    }

    /// `true` if the template carries at least one of `filter` (case-insensitive).
    /// An empty filter matches every template.
    pub fn matches_tags<S: AsRef<str>>(&self, filter: &[S]) -> bool {
        if filter.is_empty() {
            return true;
        }
        let tags: Vec<String> = self.tags.iter().map(|t| t.to_lowercase()).collect();
        filter
            .iter()
            .any(|wanted| tags.contains(&wanted.as_ref().to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_falls_back_to_name() {
        assert_eq!(Variable::new("client").prompt_text(), "client");
        assert_eq!(
            Variable::new("client").with_prompt("Client name").prompt_text(),
            "Client name"
        );
    }

    #[test]
    fn empty_extends_is_no_parent() {
        let t = Template::new("a", "A", "~").extending("");
        assert_eq!(t.parent_id(), None);
        assert_eq!(t.extending("base").parent_id(), Some("base"));
    }

    #[test]
    fn tags_match_case_insensitively() {
        let t = Template::new("a", "A", "~").with_tag("Video").with_tag("Client");
        assert!(t.matches_tags(&["video"]));
        assert!(t.matches_tags(&["nope", "CLIENT"]));
        assert!(!t.matches_tags(&["photo"]));
        assert!(t.matches_tags::<&str>(&[]));
    }

    #[test]
    fn unicode_tags_match_case_insensitively() {
        let t = Template::new("a", "A", "~").with_tag("Überblick");
        assert!(t.matches_tags(&["überblick"]));
    }

    #[test]
    fn deserializes_yaml_field_names() {
        let yaml = r##"
id: dev
name: Development
base_path: ~/Projects
extends: base
directories:
  - name: src
    optional: true
    when: "lang == rust"
    files:
      - name: README.md
        content: "# {name}"
    children:
      - name: bin
"##;
        let t: Template = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(t.parent_id(), Some("base"));
        let src = &t.directories[0];
        assert!(src.optional);
        assert_eq!(src.when, "lang == rust");
        assert_eq!(src.files[0].content, "# {name}");
        assert_eq!(src.children[0].name, "bin");
    }

    #[test]
    fn serialization_omits_empty_fields() {
        let t = Template::new("dev", "Dev", "~/p").with_directory(Directory::new("src"));
        let yaml = serde_yaml::to_string(&t).unwrap();
        assert!(!yaml.contains("hooks"));
        assert!(!yaml.contains("optional"));
        assert!(!yaml.contains("extends"));
    }
}
