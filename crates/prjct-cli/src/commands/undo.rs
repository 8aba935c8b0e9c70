//! `prjct undo` - reverse the last create or clone.

use chrono::Local;

use prjct_adapters::LocalFilesystem;
use prjct_core::prelude::*;

use crate::{commands::Context, error::CliResult};

pub fn execute(ctx: &Context) -> CliResult<()> {
    let outcome = ctx.history().undo(
        &LocalFilesystem::new(),
        &ctx.index(),
        ctx.global.dry_run,
    )?;

    match outcome {
        UndoOutcome::NothingToUndo => {
            ctx.output.print("Nothing to undo.")?;
        }
        UndoOutcome::Preview(record) => {
            describe(ctx, &record)?;
            ctx.output
                .info("Dry run: would attempt to undo the above operation.")?;
        }
        UndoOutcome::NotUndoable(record) => {
            describe(ctx, &record)?;
            ctx.output.warning(&format!(
                "Cannot undo operation type \"{}\" automatically.",
                record.operation
            ))?;
        }
        UndoOutcome::Reverted { record, removed } => {
            describe(ctx, &record)?;
            ctx.output
                .print(&format!("Removed: {}", removed.display()))?;
            ctx.output.success("Undo complete.")?;
        }
    }
    Ok(())
}

fn describe(ctx: &Context, record: &OperationRecord) -> CliResult<()> {
    ctx.output.print(&format!(
        "Last operation: {} at {}",
        record.operation,
        record
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    ))?;
    for (key, value) in &record.details {
        ctx.output.print(&format!("  {key}: {value}"))?;
    }
    Ok(())
}
