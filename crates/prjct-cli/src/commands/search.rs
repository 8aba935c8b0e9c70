//! `prjct search` and `prjct recent` - queries against the project index.

use chrono::Local;

use prjct_core::prelude::*;

use crate::{
    cli::{RecentArgs, SearchArgs},
    commands::Context,
    error::CliResult,
};

const HEADERS: [&str; 4] = ["NAME", "TEMPLATE", "PATH", "CREATED"];

pub fn search(args: SearchArgs, ctx: &Context) -> CliResult<()> {
    let text = args.query.unwrap_or_default();
    let mut query = SearchQuery::new(&text).fuzzy(args.fuzzy && !text.is_empty());
    if let Some(template) = args.template {
        query = query.template(template);
    }
    let results = ctx.index().search(&query)?;

    if ctx.output.is_json() {
        return ctx.output.json(&results);
    }

    if !results.is_empty() {
        ctx.output.table(&HEADERS, &rows(&results))?;
        ctx.output.print("")?;
    }
    ctx.output
        .print(&format!("Found {} project(s)", results.len()))?;
    Ok(())
}

pub fn recent(args: RecentArgs, ctx: &Context) -> CliResult<()> {
    let index = ctx.index();
    let entries = index.recent(args.limit)?;

    if ctx.output.is_json() {
        return ctx.output.json(&entries);
    }

    if entries.is_empty() {
        ctx.output.print("No projects indexed yet.")?;
        return Ok(());
    }

    let total = index.load()?.projects.len();
    ctx.output.table(&HEADERS, &rows(&entries))?;
    ctx.output.print("")?;
    ctx.output.print(&format!(
        "Showing {} of {} project(s)",
        entries.len(),
        total
    ))?;
    Ok(())
}

fn rows(entries: &[ProjectEntry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|e| {
            vec![
                e.name.clone(),
                e.template_id.clone(),
                e.path.clone(),
                e.created_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            ]
        })
        .collect()
}
