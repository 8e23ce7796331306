//! The statistical-package interpreter: locating it and running scripts.
//!
//! Scripts run with the interpreter's working directory set through a
//! [`DirectoryScope`], so the caller's directory is back in place as soon as
//! the run returns, whatever its outcome.

mod install;
mod test_runner;

pub use install::Installer;
pub use test_runner::TestRunner;

use crate::{
    bundler::{
        Result, Settings,
        builder::{Candidate, PathResolver},
        utils::{DirectoryScope, ToolCommand},
    },
    error::ReleaseError,
    request::{BuildRequest, split_args},
};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    process::ExitStatus,
};

/// A located interpreter, ready to run scripts.
#[derive(Clone, Debug)]
pub struct Interpreter {
    executable: PathBuf,
    home_dir: PathBuf,
    args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl Interpreter {
    /// Locates the interpreter for this run.
    ///
    /// An explicit path from the request is the only candidate when given.
    /// Otherwise the configured program is searched on the search path,
    /// then in the fallback install directory. A fallback hit makes that
    /// directory the interpreter's home; every other hit uses the project
    /// root.
    ///
    /// # Errors
    ///
    /// [`ReleaseError::InterpreterNotFound`] when no candidate resolves.
    pub fn locate(
        settings: &Settings,
        request: &BuildRequest,
        resolver: &PathResolver,
    ) -> crate::error::Result<Self> {
        let config = settings.interpreter();
        let (wanted, candidates) = match &request.interpreter_path {
            Some(path) => {
                let wanted = path.display().to_string();
                let candidate = Candidate::for_program(&wanted);
                (wanted, vec![candidate])
            }
            None => {
                let mut candidates = vec![Candidate::SearchPath(config.program.clone())];
                if let Some(dir) = &config.fallback_dir {
                    candidates.push(Candidate::InDirectory {
                        dir: dir.clone(),
                        name: config.program.clone(),
                    });
                }
                (config.program.clone(), candidates)
            }
        };

        let resolved = resolver
            .resolve_first(&candidates)
            .ok_or(ReleaseError::InterpreterNotFound { executable: wanted })?;

        let home_dir = match resolved.candidate {
            Candidate::InDirectory { dir, .. } => dir,
            _ => settings.project_root().to_path_buf(),
        };
        let args = split_args(
            request
                .interpreter_args
                .as_deref()
                .unwrap_or(config.default_args.as_str()),
        );

        log::debug!(
            "Using interpreter {} from {}",
            resolved.path.display(),
            home_dir.display()
        );
        Ok(Self {
            executable: resolved.path,
            home_dir,
            args,
            env: config.env.clone(),
        })
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Directory install scripts are run from.
    pub fn home_dir(&self) -> &Path {
        &self.home_dir
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Runs `script` from inside `dir` and waits for the interpreter.
    pub async fn run_script(&self, script: &Path, dir: &Path) -> Result<ExitStatus> {
        let _scope = DirectoryScope::enter(dir)?;
        ToolCommand::new(&self.executable)
            .args(self.args.iter().cloned())
            .arg(script.display().to_string())
            .envs(&self.env)
            .status()
            .await
    }
}
