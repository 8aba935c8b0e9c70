//! Command handlers.
//!
//! Each handler translates parsed arguments into calls on the core services
//! and renders the result. Adapter wiring is shared through [`Context`].

pub mod archive;
pub mod clone;
pub mod completions;
pub mod config;
pub mod create;
pub mod install;
pub mod layout;
pub mod list;
pub mod search;
pub mod tree;
pub mod undo;
pub mod validate;

use chrono::Utc;
use tracing::warn;

use prjct_adapters::{
    JsonJournal, JsonProjectIndex, LocalFilesystem, ShellHookRunner, YamlTemplateSource,
};
use prjct_core::prelude::*;

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult, output::OutputManager};

/// Everything a handler needs: flags, resolved locations and the output sink.
pub struct Context {
    pub global: GlobalArgs,
    pub config: AppConfig,
    pub output: OutputManager,
}

impl Context {
    pub fn new(global: GlobalArgs, config: AppConfig, output: OutputManager) -> Self {
        Self {
            global,
            config,
            output,
        }
    }

    /// Load and validate the active configuration document.
    pub fn templates(&self) -> CliResult<TemplateService> {
        let source = YamlTemplateSource::new(&self.config.config_file);
        Ok(TemplateService::load(&source)?)
    }

    pub fn index(&self) -> IndexService {
        IndexService::new(Box::new(JsonProjectIndex::new(&self.config.index_file)))
    }

    pub fn history(&self) -> HistoryService {
        HistoryService::new(Box::new(JsonJournal::new(&self.config.journal_file)))
    }

    pub fn scaffold(&self) -> ScaffoldService {
        let service = ScaffoldService::new(
            Box::new(LocalFilesystem::new()),
            Box::new(ShellHookRunner::new()),
        );
        match &self.config.home_dir {
            Some(home) => service.with_home_dir(home),
            None => service,
        }
    }

    pub fn layout(&self) -> LayoutService {
        LayoutService::new(Box::new(LocalFilesystem::new()))
    }

    /// Journal an operation. Failures are logged and otherwise ignored.
    pub fn record(&self, operation: OperationKind, details: &[(&str, String)]) {
        let record = details
            .iter()
            .fold(OperationRecord::new(operation, Utc::now()), |rec, (k, v)| {
                rec.with_detail(*k, v.clone())
            });
        if let Err(err) = self.history().record(record) {
            warn!(error = %err, operation = %operation, "cannot write journal");
        }
    }

    /// Track a project in the index. Failures are logged and otherwise ignored.
    pub fn track(&self, entry: ProjectEntry) {
        match self.index().add(entry) {
            Ok(true) => {}
            Ok(false) => tracing::debug!("project already indexed"),
            Err(err) => warn!(error = %err, "cannot update project index"),
        }
    }

    /// First indexed project matching `query`.
    pub fn find_project(&self, query: &str) -> CliResult<ProjectEntry> {
        Ok(self.index().find_first(query)?)
    }
}
