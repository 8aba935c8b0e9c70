//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "prjct",
    bin_name = "prjct",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create project directory structures from templates",
    long_about = "prjct creates predefined directory structures from YAML-configured \
                  templates. Provide a template and project name as arguments, or run \
                  without arguments to choose interactively.",
    after_help = "EXAMPLES:\n\
        \x20 prjct video \"Client Spot 2024\"\n\
        \x20 prjct dev my-tool --var license=MIT --skip ci\n\
        \x20 prjct --dry-run photo \"Wedding Smith\"\n\
        \x20 prjct tree video\n\
        \x20 prjct search smith --fuzzy"
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Project creation arguments (used when no subcommand is given).
    #[command(flatten)]
    pub create: CreateArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments for `prjct [TEMPLATE NAME]`.
#[derive(Debug, Clone, Default, Args)]
pub struct CreateArgs {
    /// Template id. Omit together with NAME to choose interactively.
    #[arg(value_name = "TEMPLATE", requires = "name")]
    pub template: Option<String>,

    /// Project name. Characters illegal on any platform are replaced.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Set a template variable, overriding its default.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Set a template variable (repeatable)"
    )]
    pub vars: Vec<(String, String)>,

    /// Skip an optional directory by name.
    #[arg(
        long = "skip",
        value_name = "DIR",
        help = "Skip an optional directory (repeatable)"
    )]
    pub skip: Vec<String>,
}

impl CreateArgs {
    /// `true` when none of the project creation arguments were given.
    pub fn is_empty(&self) -> bool {
        self.template.is_none()
            && self.name.is_none()
            && self.vars.is_empty()
            && self.skip.is_empty()
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got {raw:?}")),
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List available templates.
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n\
            \x20 prjct list\n\
            \x20 prjct list --tag media"
    )]
    List(ListArgs),

    /// Preview a template's directory structure.
    Tree(TreeArgs),

    /// Check a configuration file and report every issue.
    Validate(ValidateArgs),

    /// Search indexed projects.
    #[command(after_help = "EXAMPLES:\n\
            \x20 prjct search smith\n\
            \x20 prjct search --template video\n\
            \x20 prjct search smtih --fuzzy")]
    Search(SearchArgs),

    /// Show the most recently created projects.
    Recent(RecentArgs),

    /// Compare a project against its template.
    Diff(DiffArgs),

    /// Create the template directories missing from a project.
    Sync(QueryArgs),

    /// Copy a project's directory structure into a new sibling project.
    Clone(CloneArgs),

    /// Remove empty directories from a project.
    Clean(QueryArgs),

    /// Pack a project into a .tar.gz file.
    #[command(after_help = "EXAMPLES:\n\
            \x20 prjct archive smith\n\
            \x20 prjct archive smith -o ~/Backups/smith.tar.gz --delete")]
    Archive(ArchiveArgs),

    /// Reverse the last create or clone.
    Undo,

    /// Write the default configuration file.
    Install(InstallArgs),

    /// Show configuration locations.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(after_help = "EXAMPLES:\n\
            \x20 prjct completion bash > ~/.local/share/bash-completion/completions/prjct\n\
            \x20 prjct completion zsh  > ~/.zfunc/_prjct\n\
            \x20 prjct completion fish > ~/.config/fish/completions/prjct.fish")]
    Completion(CompletionArgs),
}

// ── list / tree / validate ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show templates carrying one of these tags.
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    #[arg(value_name = "TEMPLATE")]
    pub template: String,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Configuration file to check.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

// ── index commands ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text matched against name, template and path. Empty lists everything.
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Only projects created from this template id.
    #[arg(short = 't', long = "template", value_name = "ID")]
    pub template: Option<String>,

    /// Tolerate typos (edit distance up to 2).
    #[arg(long = "fuzzy")]
    pub fuzzy: bool,
}

#[derive(Debug, Args)]
pub struct RecentArgs {
    /// Number of projects to show.
    #[arg(short = 'n', long = "limit", value_name = "N", default_value_t = 10)]
    pub limit: usize,
}

/// A project looked up in the index by search query.
#[derive(Debug, Args)]
pub struct QueryArgs {
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Debug, Args)]
pub struct CloneArgs {
    /// Project to copy, looked up in the index.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Name of the new project.
    #[arg(value_name = "NEW_NAME")]
    pub new_name: String,

    /// Copy file contents as well as directories.
    #[arg(long = "with-files")]
    pub with_files: bool,
}

#[derive(Debug, Args)]
pub struct ArchiveArgs {
    /// Project to archive, looked up in the index.
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Archive file to write (default: <project>.tar.gz next to the project).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Delete the project directory once the archive is written.
    #[arg(long = "delete")]
    pub delete: bool,
}

// ── layout commands ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DiffArgs {
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    #[arg(value_name = "PROJECT_PATH")]
    pub path: PathBuf,
}

// ── install / config / completion ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Overwrite an existing config without prompting.
    #[arg(short = 'f', long = "force")]
    pub force: bool,
}

/// Subcommands for `prjct config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the path of the active configuration file.
    Path,
    /// Print every resolved location and whether the config exists.
    Show,
}

#[derive(Debug, Args)]
pub struct CompletionArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
