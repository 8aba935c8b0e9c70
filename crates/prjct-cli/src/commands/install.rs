//! `prjct install` - write the default configuration file.

use prjct_adapters::write_default_config;

use crate::{
    cli::InstallArgs,
    commands::Context,
    error::CliResult,
};

/// Write the starter templates to the active config location.
///
/// An existing file is kept unless `--force` is given or the user confirms
/// the overwrite at an interactive prompt.
pub fn execute(args: InstallArgs, ctx: &Context) -> CliResult<()> {
    let path = &ctx.config.config_file;

    let force = args.force || confirm_overwrite(ctx)?;

    if ctx.global.dry_run {
        ctx.output
            .info(&format!("Dry run: would write {}", path.display()))?;
        return Ok(());
    }

    if write_default_config(path, force)? {
        ctx.output
            .success(&format!("Config created: {}", path.display()))?;
        ctx.output
            .print("Edit this file to customize your project templates.")?;
    } else {
        ctx.output.warning(&format!(
            "Config already exists: {}  (use --force to overwrite)",
            path.display()
        ))?;
    }
    Ok(())
}

/// Ask before replacing an existing config. Declining cancels the command.
#[cfg(feature = "interactive")]
fn confirm_overwrite(ctx: &Context) -> CliResult<bool> {
    use std::io::IsTerminal;

    use crate::error::CliError;

    let path = &ctx.config.config_file;
    if !path.exists() || ctx.global.quiet || !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    let overwrite = dialoguer::Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "interactive prompt failed".into(),
            source: std::io::Error::other(e),
        })?;
    if overwrite {
        Ok(true)
    } else {
        Err(CliError::Cancelled)
    }
}

#[cfg(not(feature = "interactive"))]
fn confirm_overwrite(_ctx: &Context) -> CliResult<bool> {
    Ok(false)
}
