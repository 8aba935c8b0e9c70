//! `prjct clone <QUERY> <NEW_NAME>` - copy a tracked project's layout.

use std::path::Path;

use chrono::Utc;
use serde_json::json;
use tracing::instrument;

use prjct_core::prelude::*;

use crate::{
    cli::CloneArgs,
    commands::Context,
    error::{CliError, CliResult},
};

/// The clone lands next to the source, under the sanitized new name, and is
/// indexed with the source's template.
#[instrument(skip_all, fields(query = %args.query))]
pub fn execute(args: CloneArgs, ctx: &Context) -> CliResult<()> {
    let entry = ctx.find_project(&args.query)?;
    let new_name = sanitize_project_name(&args.new_name)?;

    let source = Path::new(&entry.path);
    let parent = source.parent().ok_or_else(|| CliError::InvalidInput {
        message: format!("project path '{}' has no parent directory", entry.path),
    })?;
    let destination = parent.join(&new_name);
    let dry_run = ctx.global.dry_run;

    let report = ctx
        .layout()
        .clone_tree(source, &destination, args.with_files, dry_run)?;
    let dest = report.destination.display().to_string();

    if !dry_run {
        ctx.track(ProjectEntry::new(
            &new_name,
            &entry.template_id,
            &entry.template_name,
            &dest,
            Utc::now(),
        ));
        ctx.record(
            OperationKind::Clone,
            &[
                ("path", dest.clone()),
                ("source", entry.path.clone()),
                ("name", new_name.clone()),
            ],
        );
    }

    if ctx.output.is_json() {
        return ctx.output.json(&json!({
            "source": entry.path,
            "destination": dest,
            "dirs": report.dirs,
            "files": report.files,
            "dry_run": dry_run,
        }));
    }

    if dry_run {
        ctx.output
            .info(&format!("Dry run: would clone {} to {dest}", entry.path))?;
        return Ok(());
    }

    ctx.output.success(&format!("Cloned: {}", entry.path))?;
    ctx.output.print(&format!("    To: {dest}"))?;
    ctx.output.print(&format!("  Dirs: {}", report.dirs))?;
    if report.files > 0 {
        ctx.output.print(&format!(" Files: {}", report.files))?;
    }
    Ok(())
}
