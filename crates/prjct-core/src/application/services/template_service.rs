//! Template Service - loads, validates and queries the configuration.
//!
//! Separated from ScaffoldService for single responsibility: nothing here
//! touches the project tree.

use tracing::{debug, instrument};

use crate::{
    application::ports::TemplateSource,
    domain::{DomainError, Template, TemplateSet, flatten},
    error::PrjctResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub base_path: String,
    pub tags: Vec<String>,
    pub extends: Option<String>,
    /// Directories after inheritance, nested ones included.
    pub directory_count: usize,
}

/// A validated configuration document.
#[derive(Debug, Clone)]
pub struct TemplateService {
    set: TemplateSet,
}

impl TemplateService {
    /// Load the document from `source` and reject it unless it is fully valid.
    #[instrument(skip_all)]
    pub fn load(source: &dyn TemplateSource) -> PrjctResult<Self> {
        Self::from_set(source.load()?)
    }

    /// Validate an already parsed document.
    pub fn from_set(set: TemplateSet) -> PrjctResult<Self> {
        let issues = set.validate();
        if !issues.is_empty() {
            return Err(DomainError::ValidationFailed { issues }.into());
        }
        debug!(templates = set.templates.len(), "configuration loaded");
        Ok(Self { set })
    }

    pub fn template_set(&self) -> &TemplateSet {
        &self.set
    }

    pub fn editor(&self) -> Option<&str> {
        self.set.editor.as_deref()
    }

    /// The template with its `extends` chain merged in.
    pub fn resolve(&self, id: &str) -> PrjctResult<Template> {
        Ok(self.set.resolve(id)?)
    }

    /// Templates carrying any of `tags` (all for an empty filter), in document order.
    pub fn list<S: AsRef<str>>(&self, tags: &[S]) -> PrjctResult<Vec<TemplateInfo>> {
        self.set
            .filter_by_tags(tags)
            .map(|t| {
                let resolved = self.set.resolve(&t.id)?;
                Ok(TemplateInfo {
                    id: t.id.clone(),
                    name: resolved.name,
                    base_path: resolved.base_path,
                    tags: t.tags.clone(),
                    extends: t.parent_id().map(str::to_string),
                    directory_count: flatten(&resolved.directories, "").len(),
                })
            })
            .collect()
    }
}
