//! Hook runners: shell execution for real runs, recording for tests.

use std::{
    path::{Path, PathBuf},
    process::Command,
    sync::{Arc, Mutex},
};

use prjct_core::{
    application::{ApplicationError, ports::HookRunner},
    error::PrjctResult,
};
use tracing::{debug, instrument};

/// Runs each hook through the platform shell (`sh -c`, or `cmd /c` on
/// Windows) with the project root as working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellHookRunner;

impl ShellHookRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/c", command]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        }
    }
}

impl HookRunner for ShellHookRunner {
    #[instrument(skip(self), fields(workdir = %workdir.display()))]
    fn run(&self, command: &str, workdir: &Path) -> PrjctResult<()> {
        let status = Self::command(command)
            .current_dir(workdir)
            .status()
            .map_err(|e| ApplicationError::ExternalCommand {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        if status.success() {
            debug!("hook finished");
            Ok(())
        } else {
            Err(ApplicationError::ExternalCommand {
                command: command.to_string(),
                reason: match status.code() {
                    Some(code) => format!("exited with status {code}"),
                    None => "terminated by signal".into(),
                },
            }
            .into())
        }
    }
}

/// Records hook invocations instead of running them. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingHookRunner {
    calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
    fail_on: Option<String>,
}

impl RecordingHookRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail whenever `command` is run.
    pub fn failing_on(mut self, command: impl Into<String>) -> Self {
        self.fail_on = Some(command.into());
        self
    }

    /// Commands run so far, with their working directories.
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl HookRunner for RecordingHookRunner {
    fn run(&self, command: &str, workdir: &Path) -> PrjctResult<()> {
        self.calls
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .push((command.to_string(), workdir.to_path_buf()));

        if self.fail_on.as_deref() == Some(command) {
            return Err(ApplicationError::ExternalCommand {
                command: command.to_string(),
                reason: "exited with status 1".into(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    #[test]
    fn shell_runner_uses_workdir() {
        let temp = TempDir::new().unwrap();
        ShellHookRunner::new()
            .run("touch marker", temp.path())
            .unwrap();
        assert!(temp.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[test]
    fn shell_runner_reports_non_zero_exit() {
        let temp = TempDir::new().unwrap();
        let err = ShellHookRunner::new().run("exit 3", temp.path()).unwrap_err();
        assert!(err.to_string().contains("status 3"));
    }

    #[test]
    fn recording_runner_logs_and_fails_on_request() {
        let runner = RecordingHookRunner::new().failing_on("boom");
        runner.run("git init", Path::new("/p")).unwrap();
        assert!(runner.run("boom", Path::new("/p")).is_err());

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("git init".to_string(), PathBuf::from("/p")));
    }
}
