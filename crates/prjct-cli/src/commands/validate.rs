//! `prjct validate <FILE>` - check a configuration document.

use serde::Serialize;

use prjct_adapters::YamlTemplateSource;
use prjct_core::prelude::*;

use crate::{cli::ValidateArgs, commands::Context, error::CliResult};

#[derive(Serialize)]
struct ValidTemplate<'a> {
    id: &'a str,
    name: &'a str,
}

/// Parse and validate `args.file`. Every issue is reported at once through
/// the returned error.
pub fn execute(args: ValidateArgs, ctx: &Context) -> CliResult<()> {
    let set = YamlTemplateSource::new(&args.file).load()?;
    let service = TemplateService::from_set(set)?;
    let templates = &service.template_set().templates;

    if ctx.output.is_json() {
        let valid: Vec<ValidTemplate<'_>> = templates
            .iter()
            .map(|t| ValidTemplate {
                id: &t.id,
                name: &t.name,
            })
            .collect();
        return ctx.output.json(&valid);
    }

    ctx.output
        .success(&format!("Valid: {} template(s) found", templates.len()))?;
    for t in templates {
        ctx.output.print(&format!("  - {} ({})", t.name, t.id))?;
    }
    Ok(())
}
