//! `prjct config` - show where configuration and state live.

use serde::Serialize;

use crate::{cli::ConfigCommands, commands::Context, config::AppConfig, error::CliResult};

#[derive(Serialize)]
struct ConfigReport<'a> {
    #[serde(flatten)]
    locations: &'a AppConfig,
    config_exists: bool,
}

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, ctx: &Context) -> CliResult<()> {
    let config = &ctx.config;
    match cmd {
        ConfigCommands::Path => {
            // Printed even with --quiet so scripts can capture it.
            println!("{}", config.config_file.display());
        }

        ConfigCommands::Show => {
            let report = ConfigReport {
                locations: config,
                config_exists: config.config_file.exists(),
            };
            if ctx.output.is_json() {
                return ctx.output.json(&report);
            }
            ctx.output.header("Current configuration:")?;
            for line in show_lines(&report) {
                ctx.output.print(&line)?;
            }
        }
    }

    Ok(())
}

fn show_lines(report: &ConfigReport<'_>) -> Vec<String> {
    let config = report.locations;
    let mut lines = vec![
        format!(
            "  Config:  {}{}",
            config.config_file.display(),
            if report.config_exists { "" } else { " (missing, run `prjct install`)" }
        ),
        format!("  Index:   {}", config.index_file.display()),
        format!("  Journal: {}", config.journal_file.display()),
    ];
    if let Some(home) = &config.home_dir {
        lines.push(format!("  Home:    {}", home.display()));
    }
    lines
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config() -> AppConfig {
        AppConfig {
            config_file: PathBuf::from("/cfg/config.yaml"),
            index_file: PathBuf::from("/cfg/projects.json"),
            journal_file: PathBuf::from("/cfg/journal.json"),
            home_dir: None,
        }
    }

    #[test]
    fn missing_config_is_flagged() {
        let config = config();
        let lines = show_lines(&ConfigReport {
            locations: &config,
            config_exists: false,
        });
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("prjct install"));
        assert!(lines[1].ends_with("projects.json"));
    }

    #[test]
    fn report_serializes_flat() {
        let config = config();
        let value = serde_json::to_value(ConfigReport {
            locations: &config,
            config_exists: true,
        })
        .unwrap();
        assert_eq!(value["config_file"], "/cfg/config.yaml");
        assert_eq!(value["config_exists"], true);
        assert!(value.get("home_dir").is_none());
    }
}
