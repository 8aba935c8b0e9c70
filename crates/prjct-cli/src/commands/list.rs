//! Implementation of the `prjct list` command.

use crate::{cli::ListArgs, commands::Context, error::CliResult};

pub fn execute(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let templates = ctx.templates()?.list(&args.tags)?;

    if ctx.output.is_json() {
        return ctx.output.json(&templates);
    }

    ctx.output.header("Available templates:")?;
    ctx.output.print("")?;

    let rows: Vec<Vec<String>> = templates
        .iter()
        .map(|t| {
            vec![
                t.id.clone(),
                t.name.clone(),
                t.base_path.clone(),
                t.tags.join(", "),
            ]
        })
        .collect();
    ctx.output
        .table(&["ID", "NAME", "BASE PATH", "TAGS"], &rows)?;

    if !args.tags.is_empty() && templates.is_empty() {
        ctx.output.print("")?;
        ctx.output.warning(&format!(
            "No templates matching tag {:?}",
            args.tags.join(", ")
        ))?;
    }
    Ok(())
}
