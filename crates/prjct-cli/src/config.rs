//! Application configuration: where the template file, project index and
//! journal live.
//!
//! [`AppConfig`] is resolved once at startup and passed down by value.  The
//! CLI layer owns these locations; the core crate never sees them.
//!
//! # Resolution order (highest priority first)
//!
//! 1. `--config <FILE>`
//! 2. Environment variables `PRJCT_CONFIG_FILE`, `PRJCT_INDEX_FILE`,
//!    `PRJCT_JOURNAL_FILE` (a `.env` file is honoured via `dotenvy`)
//! 3. Built-in defaults: `~/.config/prjct/config.yaml`
//!    (`~/.prjct/config.yaml` on Windows), with `projects.json` and
//!    `journal.json` next to it
//!
//! `--profile <name>` then swaps the file name for `config.<name>.yaml`
//! in the same directory.

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use prjct_adapters::store::{INDEX_FILE_NAME, JOURNAL_FILE_NAME};

use crate::{
    cli::global::GlobalArgs,
    error::{CliError, CliResult},
};

pub const ENV_PREFIX: &str = "PRJCT";
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolved locations for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Template document (YAML).
    pub config_file: PathBuf,
    /// Project index (JSON).
    pub index_file: PathBuf,
    /// Operation journal (JSON).
    pub journal_file: PathBuf,
    /// What `~` expands to in template base paths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_dir: Option<PathBuf>,
}

/// Overrides read from the environment.
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    config_file: Option<PathBuf>,
    index_file: Option<PathBuf>,
    journal_file: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve every location from flags, the process environment and defaults.
    pub fn load(args: &GlobalArgs) -> CliResult<Self> {
        let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        Self::resolve(args, Environment::with_prefix(ENV_PREFIX), home)
    }

    fn resolve(args: &GlobalArgs, env: Environment, home: Option<PathBuf>) -> CliResult<Self> {
        let overrides: EnvOverrides = Config::builder()
            .add_source(env)
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| CliError::ConfigError {
                message: format!("invalid {ENV_PREFIX}_* environment: {e}"),
                source: Some(Box::new(e)),
            })?;

        let mut config_file = match (&args.config, overrides.config_file) {
            (Some(flag), _) => flag.clone(),
            (None, Some(env)) => env,
            (None, None) => default_config_path(home.as_deref())?,
        };
        if let Some(profile) = &args.profile {
            config_file = profile_path(&config_file, profile);
        }

        let dir = config_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self {
            index_file: overrides
                .index_file
                .unwrap_or_else(|| dir.join(INDEX_FILE_NAME)),
            journal_file: overrides
                .journal_file
                .unwrap_or_else(|| dir.join(JOURNAL_FILE_NAME)),
            config_file,
            home_dir: home,
        })
    }
}

/// Platform default config location under `home`.
pub fn default_config_path(home: Option<&Path>) -> CliResult<PathBuf> {
    let home = home.ok_or_else(|| CliError::ConfigError {
        message: "cannot determine home directory; pass --config <FILE>".into(),
        source: None,
    })?;
    Ok(if cfg!(windows) {
        home.join(".prjct").join(CONFIG_FILE_NAME)
    } else {
        home.join(".config").join("prjct").join(CONFIG_FILE_NAME)
    })
}

/// `dir/config.yaml` becomes `dir/config.<profile>.yaml`.
fn profile_path(config_file: &Path, profile: &str) -> PathBuf {
    let file = format!("config.{profile}.yaml");
    match config_file.parent() {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
