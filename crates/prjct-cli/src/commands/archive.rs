//! `prjct archive <QUERY>` - pack a tracked project into a `.tar.gz`.

use std::path::Path;

use serde_json::json;
use tracing::{instrument, warn};

use prjct_adapters::TarGzArchiver;

use crate::{cli::ArchiveArgs, commands::Context, error::CliResult};

const ARCHIVED_STATUS: &str = "archived";

/// The index entry stays, marked archived, even when `--delete` removed the
/// project directory.
#[instrument(skip_all, fields(query = %args.query))]
pub fn execute(args: ArchiveArgs, ctx: &Context) -> CliResult<()> {
    let entry = ctx.find_project(&args.query)?;
    let dry_run = ctx.global.dry_run;

    let report = ctx.layout().archive(
        &TarGzArchiver::new(),
        Path::new(&entry.path),
        args.output.as_deref(),
        args.delete,
        dry_run,
    )?;
    let output = report.output.display().to_string();

    if !dry_run {
        let marked = ctx.index().update(&entry.path, |e| {
            e.status = Some(ARCHIVED_STATUS.to_string());
        });
        if let Err(err) = marked {
            warn!(error = %err, "cannot update project index");
        }
    }

    if ctx.output.is_json() {
        return ctx.output.json(&json!({
            "project": entry.path,
            "archive": output,
            "files": report.files,
            "deleted": report.deleted,
            "dry_run": dry_run,
        }));
    }

    if dry_run {
        let mut line = format!("Dry run: would archive {} to {output}", entry.path);
        if args.delete {
            line.push_str(" and delete the original");
        }
        ctx.output.info(&line)?;
        return Ok(());
    }

    ctx.output.success(&format!("Archived: {output}"))?;
    ctx.output.print(&format!("   Files: {}", report.files))?;
    if report.deleted {
        ctx.output.print(&format!(" Deleted: {}", entry.path))?;
    }
    Ok(())
}
