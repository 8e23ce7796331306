//! Native plugin compilation through the external build tool.

use super::tool_detection::PathResolver;
use crate::bundler::{Result, Settings, error::Error, utils::ToolCommand};
use std::{
    path::{Path, PathBuf},
    process::ExitStatus,
};

/// Drives the build tool for the host and, optionally, the windows target.
///
/// The compiler does not know where binaries end up; that is the
/// artifact collector's concern.
#[derive(Debug)]
pub struct NativeCompiler<'a> {
    settings: &'a Settings,
    resolver: &'a PathResolver,
}

impl<'a> NativeCompiler<'a> {
    pub fn new(settings: &'a Settings, resolver: &'a PathResolver) -> Self {
        Self { settings, resolver }
    }

    /// Runs the host build with `flags`, then the cross build if requested.
    ///
    /// Cross build order is clean, dependency, plugin. Only the host status
    /// is returned; a failing cross step is logged as a warning and does not
    /// change the result.
    ///
    /// # Errors
    ///
    /// The build tool cannot be located or started.
    pub async fn compile(&self, flags: &[String], cross_compile: bool) -> Result<ExitStatus> {
        let tool = self.locate_tool()?;
        let host = self.command(&tool).args(flags.iter().cloned());
        let status = host.status().await?;

        if cross_compile {
            let cross = &self.settings.build_tool().cross_args;
            let steps = [
                vec![self.settings.build_tool().clean_target.clone()],
                vec![self.settings.build_tool().cross_dependency_target.clone()],
                flags.to_vec(),
            ];
            for step in steps {
                let cmd = self
                    .command(&tool)
                    .args(cross.iter().cloned())
                    .args(step);
                match cmd.status().await {
                    Ok(s) if s.success() => {}
                    Ok(s) => log::warn!(
                        "Cross-compile step `{}` failed ({}); continuing",
                        cmd.display_command(),
                        s
                    ),
                    Err(e) => log::warn!("Cross-compile step failed to start: {e}"),
                }
            }
        }

        Ok(status)
    }

    /// Runs the build tool's own clean target. The status is returned to
    /// the caller for reporting.
    pub async fn clean(&self) -> Result<ExitStatus> {
        let tool = self.locate_tool()?;
        self.command(&tool)
            .arg(self.settings.build_tool().clean_target.clone())
            .status()
            .await
    }

    fn locate_tool(&self) -> Result<PathBuf> {
        let program = &self.settings.build_tool().program;
        self.resolver
            .resolve(program)
            .ok_or_else(|| Error::GenericError(format!("build tool '{program}' not found")))
    }

    fn command(&self, tool: &Path) -> ToolCommand {
        ToolCommand::new(tool).current_dir(self.settings.project_root())
    }
}
