//! Blocking-style execution of external tools.
//!
//! Every tool runs to completion with inherited stdio; only the exit status
//! is observed.

use crate::bundler::error::{Error, Result};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    process::ExitStatus,
};
use tokio::process::Command;

/// An external command line.
#[derive(Clone, Debug, Default)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    cwd: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn envs(mut self, env: &BTreeMap<String, String>) -> Self {
        self.env
            .extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Runs the child in `dir` without touching this process's directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Command line for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Runs the command and waits for it to exit.
    ///
    /// A non-zero exit is returned as a status, not an error; only a
    /// failure to start the process is an error.
    pub async fn status(&self) -> Result<ExitStatus> {
        log::debug!("Running `{}`", self.display_command());
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).envs(&self.env);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd.status().await.map_err(|error| Error::CommandFailed {
            command: self.display_command(),
            error,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn display_command_joins_args() {
        let cmd = ToolCommand::new("make").args(["EXECUTION=windows", "clean"]);
        assert_eq!(cmd.display_command(), "make EXECUTION=windows clean");
    }

    #[tokio::test]
    async fn exit_status_is_not_an_error() {
        assert!(ToolCommand::new("true").status().await.unwrap().success());
        assert!(!ToolCommand::new("false").status().await.unwrap().success());
    }

    #[tokio::test]
    async fn spawn_failure_is_an_error() {
        let err = ToolCommand::new("/nonexistent/tool")
            .arg("x")
            .status()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }
}
