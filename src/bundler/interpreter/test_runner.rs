//! Running the package's test script through the interpreter.

use super::Interpreter;
use crate::bundler::{Result, Settings, error::Context, utils::fs};
use std::{path::Path, process::ExitStatus};

/// Copies the test script into the build tree and runs it there.
#[derive(Debug)]
pub struct TestRunner<'a> {
    settings: &'a Settings,
    interpreter: &'a Interpreter,
}

impl<'a> TestRunner<'a> {
    pub fn new(settings: &'a Settings, interpreter: &'a Interpreter) -> Self {
        Self {
            settings,
            interpreter,
        }
    }

    /// Runs the test script from the staging directory.
    ///
    /// The interpreter's status is returned for reporting; a failing test
    /// run is not an error.
    pub async fn run_tests(&self) -> Result<ExitStatus> {
        let name = self.settings.test_file();
        let file = self
            .settings
            .files()
            .get(name)
            .context(format!("test file '{name}' is not a build file"))?;
        let staging = self.settings.staging_dir();
        fs::copy_file(&file.source_in(self.settings.project_root()), &staging.join(name)).await?;

        let log_name = Path::new(name).with_extension("log");
        log::info!(
            "Running tests (see {} for output)",
            staging.join(log_name).display()
        );
        let status = self.interpreter.run_script(Path::new(name), staging).await?;
        if status.success() {
            log::info!("Tests finished");
        } else {
            log::warn!("Tests exited with {status}");
        }
        Ok(status)
    }
}
