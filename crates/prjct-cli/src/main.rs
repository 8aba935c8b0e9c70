//! # prjct CLI
//!
//! Create project directory structures from YAML-configured templates.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Resolve config, index and journal locations (flags + env + defaults).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the appropriate command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                    |
//! |------|--------------------------------------------|
//! |  0   | Success                                    |
//! |  1   | General error (also bad command-line usage)|
//! |  2   | Config not found                           |
//! |  3   | Config invalid                             |
//! |  4   | Template not found                         |
//! |  5   | Project exists                             |
//! |  6   | Permission denied                          |
//! |  7   | Create failed                              |
//! |  8   | Invalid name                               |
//! |  9   | Cancelled                                  |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    commands::Context,
    config::AppConfig,
    error::{CliError, CliResult, exit},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Load .env before anything else, including tracing init. A missing
    // .env is not an error.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too and go to stdout.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(exit::GENERAL)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::from(exit::GENERAL);
    }

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        dry_run = cli.global.dry_run,
        "CLI started"
    );

    let verbose = cli.global.verbose > 0;

    // ── 3-5. Resolve locations, build output, dispatch ────────────────────
    match run(cli) {
        Ok(()) => {
            info!("prjct completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli) -> CliResult<()> {
    if cli.command.is_some() && !cli.create.is_empty() {
        return Err(CliError::InvalidInput {
            message: "TEMPLATE, NAME, --var and --skip cannot be combined with a subcommand"
                .into(),
        });
    }

    // Completion scripts need no configuration at all.
    if let Some(Commands::Completion(args)) = &cli.command {
        return commands::completions::execute(args.shell);
    }

    let config = AppConfig::load(&cli.global)?;
    debug!(config = %config.config_file.display(), "locations resolved");
    let output = OutputManager::new(&cli.global);
    let ctx = Context::new(cli.global, config, output);

    match cli.command {
        None => commands::create::execute(cli.create, &ctx),
        Some(Commands::List(args)) => commands::list::execute(args, &ctx),
        Some(Commands::Tree(args)) => commands::tree::execute(args, &ctx),
        Some(Commands::Validate(args)) => commands::validate::execute(args, &ctx),
        Some(Commands::Search(args)) => commands::search::search(args, &ctx),
        Some(Commands::Recent(args)) => commands::search::recent(args, &ctx),
        Some(Commands::Diff(args)) => commands::layout::diff(args, &ctx),
        Some(Commands::Sync(args)) => commands::layout::sync(args, &ctx),
        Some(Commands::Clone(args)) => commands::clone::execute(args, &ctx),
        Some(Commands::Clean(args)) => commands::layout::clean(args, &ctx),
        Some(Commands::Archive(args)) => commands::archive::execute(args, &ctx),
        Some(Commands::Undo) => commands::undo::execute(&ctx),
        Some(Commands::Install(args)) => commands::install::execute(args, &ctx),
        Some(Commands::Config(cmd)) => commands::config::execute(cmd, &ctx),
        Some(Commands::Completion(args)) => commands::completions::execute(args.shell),
    }
}

/// Translate a `CliError` into a user message and an appropriate exit code.
///
/// This is the single place where structured errors become human-readable
/// output and OS exit codes.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // Written to stderr so the message appears even when stdout is
    // redirected. Colour only when stderr is a TTY.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
