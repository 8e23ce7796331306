//! Reinstalling the freshly built package into the interpreter.

use super::Interpreter;
use crate::bundler::{
    Result, Settings,
    error::{Error, ErrorExt},
    utils::fs,
};
use handlebars::Handlebars;
use std::{collections::BTreeMap, path::PathBuf, process::ExitStatus};

/// Install script. `cap` tolerates a package that was never installed.
const INSTALL_TEMPLATE: &str = "global builddir {{builddir}}
cap net uninstall {{package}}
net install {{package}}, from($builddir)
";

/// Replaces the installed package with the contents of the build tree.
#[derive(Debug)]
pub struct Installer<'a> {
    settings: &'a Settings,
    interpreter: &'a Interpreter,
}

impl<'a> Installer<'a> {
    pub fn new(settings: &'a Settings, interpreter: &'a Interpreter) -> Self {
        Self {
            settings,
            interpreter,
        }
    }

    /// Renders the install script for this project.
    pub fn render_script(&self) -> Result<String> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string("install.do", INSTALL_TEMPLATE)
            .map_err(|e| Error::GenericError(format!("failed to register install template: {}", e)))?;

        let mut data = BTreeMap::new();
        data.insert("builddir", self.settings.staging_dir().display().to_string());
        data.insert("package", self.settings.package_name().to_string());

        handlebars
            .render("install.do", &data)
            .map_err(|e| Error::GenericError(format!("failed to render install template: {}", e)))
    }

    /// Path of the temporary install script.
    pub fn script_path(&self) -> PathBuf {
        self.settings
            .temp_dir()
            .join(format!(".update_{}.do", self.settings.package_name()))
    }

    /// Writes the install script, runs it from the interpreter's home
    /// directory, and deletes it again.
    ///
    /// The script is removed whether or not the run succeeded. A non-zero
    /// interpreter status is returned, not raised.
    pub async fn install(&self) -> Result<ExitStatus> {
        let script = self.script_path();
        let contents = self.render_script()?;
        tokio::fs::write(&script, contents)
            .await
            .fs_context("writing install script", &script)?;

        let status = self
            .interpreter
            .run_script(&script, self.interpreter.home_dir())
            .await;

        if let Err(e) = fs::remove_file_if_exists(&script).await {
            log::warn!("Failed to remove {}: {}", script.display(), e);
        }

        let status = status?;
        if status.success() {
            log::info!("Replaced {} in the interpreter", self.settings.package_name());
        } else {
            log::warn!("Install script exited with {status}");
        }
        Ok(status)
    }
}
