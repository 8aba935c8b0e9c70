//! Implementation of `prjct [TEMPLATE NAME]`.
//!
//! Responsibility: pick the template and name (from arguments or prompts),
//! build the variable set, call the core scaffold service and display the
//! result. No business logic lives here.

use chrono::{Local, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use prjct_core::prelude::*;

use crate::{
    cli::CreateArgs,
    commands::Context,
    error::{CliError, CliResult},
};

/// What the user chose, before anything is resolved or sanitized.
#[derive(Debug)]
struct Selection {
    template_id: String,
    raw_name: String,
    /// Answers to the template's variable prompts (interactive only).
    answers: Vec<(String, String)>,
    skip: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CreateSummary<'a> {
    template: &'a str,
    name: &'a str,
    path: String,
    dirs_created: usize,
    files_created: usize,
    dry_run: bool,
}

/// Execute the create command.
///
/// 1. Choose template and name (arguments, or prompts when both are absent)
/// 2. Resolve the template and sanitize the name
/// 3. Build variables: builtins, template defaults or answers, then `--var`
/// 4. Materialize via `ScaffoldService`
/// 5. Index and journal the project (best-effort, skipped on dry run)
#[instrument(skip_all)]
pub fn execute(args: CreateArgs, ctx: &Context) -> CliResult<()> {
    let templates = ctx.templates()?;

    let selection = match (args.template, args.name) {
        (Some(template_id), Some(raw_name)) => Selection {
            template_id,
            raw_name,
            answers: Vec::new(),
            skip: args.skip,
        },
        _ => {
            let mut selection = interactive::select(&templates)?;
            selection.skip.extend(args.skip);
            selection
        }
    };

    let template = templates.resolve(&selection.template_id)?;
    let name = sanitize_project_name(&selection.raw_name)?;
    if name != selection.raw_name {
        debug!(raw = %selection.raw_name, sanitized = %name, "project name sanitized");
    }

    let variables = build_variables(&template, &name, selection.answers, args.vars);
    let mut options = CreateOptions::new(variables)
        .verbose(ctx.global.verbose > 0)
        .dry_run(ctx.global.dry_run);
    for dir in selection.skip {
        options = options.skip(dir);
    }

    let service = ctx.scaffold();
    let spinner = if ctx.global.verbose == 0 {
        ctx.output.spinner(&format!("Creating {name}..."))
    } else {
        None
    };
    let outcome = service.create(&template, &name, options);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let result = outcome?;

    if !ctx.global.dry_run {
        let path = result.project_path.display().to_string();
        ctx.track(ProjectEntry::new(
            &name,
            &template.id,
            &template.name,
            &path,
            Utc::now(),
        ));
        ctx.record(
            OperationKind::Create,
            &[
                ("path", path),
                ("template", template.id.clone()),
                ("name", name.clone()),
            ],
        );
        info!(project = %name, path = %result.project_path.display(), "project created");
    }

    if ctx.output.is_json() {
        return ctx.output.json(&CreateSummary {
            template: &template.id,
            name: &name,
            path: result.project_path.display().to_string(),
            dirs_created: result.dirs_created,
            files_created: result.files_created,
            dry_run: ctx.global.dry_run,
        });
    }

    if ctx.global.dry_run {
        ctx.output.info("Dry run: no directories created")?;
    } else {
        ctx.output.success("Project created successfully!")?;
    }
    ctx.output
        .print(&format!("  Template: {}", result.template_name))?;
    ctx.output.print(&format!("  Name:     {name}"))?;
    ctx.output
        .print(&format!("  Path:     {}", result.project_path.display()))?;
    ctx.output
        .print(&format!("  Folders:  {}", result.dirs_created))?;
    if result.files_created > 0 {
        ctx.output
            .print(&format!("  Files:    {}", result.files_created))?;
    }
    Ok(())
}

/// Builtins first, then each template variable (its answer if one was
/// given, else its default), then `--var` overrides.
fn build_variables(
    template: &Template,
    name: &str,
    answers: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
) -> Variables {
    let mut variables = Variables::builtin(name, &Local::now());
    for var in &template.variables {
        variables.insert(&var.name, &var.default);
    }
    variables.extend(answers);
    variables.extend(overrides);
    variables
}

/// Every optional directory in the tree, by unresolved name.
#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn optional_directories(dirs: &[Directory]) -> Vec<String> {
    let mut names = Vec::new();
    for dir in dirs {
        if dir.optional {
            names.push(dir.name.clone());
        }
        names.extend(optional_directories(&dir.children));
    }
    names
}

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::{FuzzySelect, Input, MultiSelect};

    use super::*;

    fn prompt_error(err: dialoguer::Error) -> CliError {
        CliError::IoError {
            message: "interactive prompt failed".into(),
            source: std::io::Error::other(err),
        }
    }

    pub(super) fn select(templates: &TemplateService) -> CliResult<Selection> {
        let set = templates.template_set();
        let items: Vec<String> = set
            .templates
            .iter()
            .map(|t| format!("{} ({})", t.name, t.id))
            .collect();

        let index = FuzzySelect::new()
            .with_prompt("Select template")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(CliError::Cancelled)?;
        let template_id = set.templates[index].id.clone();

        let raw_name: String = Input::new()
            .with_prompt("Project name")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        if raw_name.trim().is_empty() {
            return Err(CliError::Cancelled);
        }

        let template = templates.resolve(&template_id)?;

        let mut answers = Vec::new();
        for var in &template.variables {
            let value: String = Input::new()
                .with_prompt(var.prompt_text())
                .default(var.default.clone())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)?;
            answers.push((var.name.clone(), value));
        }

        let optional = optional_directories(&template.directories);
        let mut skip = Vec::new();
        if !optional.is_empty() {
            let keep = MultiSelect::new()
                .with_prompt("Optional directories (space toggles)")
                .items(&optional)
                .defaults(&vec![true; optional.len()])
                .interact_opt()
                .map_err(prompt_error)?
                .ok_or(CliError::Cancelled)?;
            skip = optional
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !keep.contains(i))
                .map(|(_, name)| name)
                .collect();
        }

        Ok(Selection {
            template_id,
            raw_name,
            answers,
            skip,
        })
    }
}

#[cfg(not(feature = "interactive"))]
mod interactive {
    use super::*;

    pub(super) fn select(_templates: &TemplateService) -> CliResult<Selection> {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}
