//! `prjct diff`, `prjct sync` and `prjct clean`: compare and repair the
//! directory layout of existing projects.

use std::path::Path;

use serde::Serialize;
use serde_json::json;

use prjct_core::prelude::*;

use crate::{
    cli::{DiffArgs, QueryArgs},
    commands::Context,
    error::CliResult,
};

pub fn diff(args: DiffArgs, ctx: &Context) -> CliResult<()> {
    let template = ctx.templates()?.resolve(&args.template)?;
    let diff = ctx.layout().diff(&template, &args.path)?;

    if ctx.output.is_json() {
        return ctx.output.json(&diff);
    }

    for rel in &diff.missing {
        ctx.output.print(&format!("  [MISSING] {rel}"))?;
    }
    for rel in &diff.extra {
        ctx.output.print(&format!("  [EXTRA]   {rel}"))?;
    }
    if !diff.missing.is_empty() || !diff.extra.is_empty() {
        ctx.output.print("")?;
    }
    ctx.output.print(&summary(&diff))?;
    Ok(())
}

fn summary(diff: &LayoutDiff) -> String {
    format!(
        "Template: {} dirs | Project: {} dirs | Matching: {} | Missing: {} | Extra: {}",
        diff.expected_total,
        diff.actual_total,
        diff.matching.len(),
        diff.missing.len(),
        diff.extra.len()
    )
}

#[derive(Serialize)]
struct SyncOutput<'a> {
    project: &'a str,
    template: &'a str,
    dry_run: bool,
    created: &'a [String],
    failed: Vec<serde_json::Value>,
}

/// Create the template directories a tracked project is missing. The
/// template is the one recorded when the project was indexed.
pub fn sync(args: QueryArgs, ctx: &Context) -> CliResult<()> {
    let entry = ctx.find_project(&args.query)?;
    let template = ctx.templates()?.resolve(&entry.template_id)?;
    let project = Path::new(&entry.path);
    let dry_run = ctx.global.dry_run;

    let report = ctx.layout().sync(&template, project, dry_run)?;

    if !dry_run && !report.created.is_empty() {
        ctx.record(
            OperationKind::Sync,
            &[
                ("path", entry.path.clone()),
                ("template", template.id.clone()),
                ("created", report.created.len().to_string()),
            ],
        );
    }

    if ctx.output.is_json() {
        return ctx.output.json(&SyncOutput {
            project: &entry.path,
            template: &template.id,
            dry_run,
            created: &report.created,
            failed: report
                .failed
                .iter()
                .map(|(path, reason)| json!({ "path": path, "reason": reason }))
                .collect(),
        });
    }

    if report.was_in_sync() {
        ctx.output
            .success("Project is in sync with template: no missing directories.")?;
        return Ok(());
    }

    for rel in &report.created {
        let full = project.join(rel);
        if dry_run {
            ctx.output
                .print(&format!("  [DRY-RUN] mkdir {}", full.display()))?;
        } else if ctx.global.verbose > 0 {
            ctx.output.print(&format!("  mkdir {}", full.display()))?;
        }
    }
    for (rel, reason) in &report.failed {
        ctx.output
            .warning(&format!("cannot create {rel}: {reason}"))?;
    }

    if dry_run {
        ctx.output.print("")?;
        ctx.output.info(&format!(
            "Dry run: would create {} missing directory(ies)",
            report.created.len()
        ))?;
    } else {
        ctx.output.success(&format!(
            "Synced {} missing directory(ies)",
            report.created.len()
        ))?;
    }
    Ok(())
}

/// Remove empty directories from a tracked project, deepest first.
pub fn clean(args: QueryArgs, ctx: &Context) -> CliResult<()> {
    let entry = ctx.find_project(&args.query)?;
    let project = Path::new(&entry.path);
    let dry_run = ctx.global.dry_run;

    let removed = ctx.layout().clean(project, dry_run)?;

    if !dry_run && !removed.is_empty() {
        ctx.record(
            OperationKind::Clean,
            &[
                ("path", entry.path.clone()),
                ("removed", removed.len().to_string()),
            ],
        );
    }

    if ctx.output.is_json() {
        return ctx.output.json(&json!({
            "project": entry.path,
            "dry_run": dry_run,
            "removed": removed,
        }));
    }

    for rel in &removed {
        let full = project.join(rel);
        if dry_run {
            ctx.output
                .print(&format!("  [DRY-RUN] rmdir {}", full.display()))?;
        } else if ctx.global.verbose > 0 {
            ctx.output.print(&format!("  rmdir {}", full.display()))?;
        }
    }

    if dry_run {
        ctx.output.info(&format!(
            "Dry run: would remove {} empty directory(ies)",
            removed.len()
        ))?;
    } else {
        ctx.output.success(&format!(
            "Removed {} empty directory(ies)",
            removed.len()
        ))?;
    }
    Ok(())
}
