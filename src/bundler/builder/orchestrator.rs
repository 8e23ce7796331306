//! Main release pipeline.
//!
//! This module provides the [`BuildDriver`] that sequences the release
//! phases and turns phase failures into [`ReleaseError`] variants with
//! their own exit codes.

use super::{
    DiscoveredArtifact, NativeCompiler, PathResolver,
    artifacts::{self, collect},
};
use crate::{
    bundler::{
        Bundle, BundlePackager, Platform, Settings,
        interpreter::{Installer, Interpreter, TestRunner},
        utils::fs,
    },
    error::{ReleaseError, Result},
    metadata::read_version,
    request::BuildRequest,
};
use std::process::ExitStatus;

/// Host operating systems the build tool knows how to compile on.
const SUPPORTED_HOSTS: [&str; 3] = ["linux", "macos", "windows"];

/// What a pipeline run did.
#[derive(Debug)]
pub enum Outcome {
    /// Only the clean phase ran.
    Cleaned,
    /// A full build ran to completion.
    Built(BuildReport),
}

/// Summary of a completed build.
#[derive(Debug)]
pub struct BuildReport {
    /// Version read from the package metadata; empty when none was found.
    pub version: String,
    /// Build tree, release archive and repository archive, in that order.
    pub bundles: Vec<Bundle>,
    /// Targets whose binary was not found and so left out of the archives.
    pub missing: Vec<Platform>,
    /// Interpreter status of the install phase, when it ran.
    pub install_status: Option<ExitStatus>,
    /// Interpreter status of the test phase, when it ran.
    pub test_status: Option<ExitStatus>,
}

/// Runs one release for a request.
///
/// Phases run strictly in order:
///
/// 1. clean (and stop) when requested
/// 2. create the staging and output directories
/// 3. reject an unknown host platform
/// 4. compile, then read the version
/// 5. collect binaries and reject a build that produced none
/// 6. package the three bundles
/// 7. reinstall, then test, when requested
#[derive(Debug)]
pub struct BuildDriver<'a> {
    settings: &'a Settings,
    request: &'a BuildRequest,
    resolver: PathResolver,
}

impl<'a> BuildDriver<'a> {
    pub fn new(settings: &'a Settings, request: &'a BuildRequest) -> Self {
        Self {
            settings,
            request,
            resolver: PathResolver::new(settings.search_path(), settings.project_root()),
        }
    }

    /// Runs the pipeline.
    ///
    /// # Errors
    ///
    /// Each fatal phase failure maps to its own [`ReleaseError`] variant;
    /// see [`ReleaseError::exit_code`].
    pub async fn run(&self) -> Result<Outcome> {
        if self.request.clean_requested {
            if self.request.needs_interpreter() || self.request.cross_compile_windows {
                log::warn!("Clean requested; ignoring build, install and test flags");
            }
            self.clean().await;
            return Ok(Outcome::Cleaned);
        }

        self.prepare_dirs().await?;
        self.check_host()?;

        self.compile().await?;
        let version = self.version().await;

        let discovered = collect(self.settings.targets());
        let missing = artifacts::missing(&discovered);
        if !missing.is_empty() && missing.len() < discovered.len() {
            log::info!(
                "Packaging without: {}",
                missing
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        artifacts::verify(&discovered)?;

        let bundles = self.package(&version, &discovered).await?;

        let mut report = BuildReport {
            version,
            bundles,
            missing,
            install_status: None,
            test_status: None,
        };

        if self.request.needs_interpreter() {
            let interpreter = Interpreter::locate(self.settings, self.request, &self.resolver)?;
            if self.request.replace_requested {
                report.install_status =
                    Some(Installer::new(self.settings, &interpreter).install().await?);
            }
            if self.request.test_requested {
                report.test_status =
                    Some(TestRunner::new(self.settings, &interpreter).run_tests().await?);
            }
        }

        Ok(Outcome::Built(report))
    }

    /// Removes staged build files and runs the build tool's clean target.
    ///
    /// Every step is best-effort; nothing here fails the run.
    async fn clean(&self) {
        let staging = self.settings.staging_dir();
        let subdir = self.settings.staging_subdir();

        for file in self.settings.files().build_set() {
            for candidate in [staging.join(&file.name), subdir.join(&file.name)] {
                match fs::remove_file_if_exists(&candidate).await {
                    Ok(true) => log::info!("deleted {}", candidate.display()),
                    Ok(false) => log::info!("{} not found", candidate.display()),
                    Err(e) => log::warn!("Could not delete {}: {}", candidate.display(), e),
                }
            }
        }

        match NativeCompiler::new(self.settings, &self.resolver).clean().await {
            Ok(status) if status.success() => log::info!("Build tool clean finished"),
            Ok(status) => log::warn!("Build tool clean exited with {status}"),
            Err(e) => log::warn!("Build tool clean did not run: {e}"),
        }
    }

    async fn prepare_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.settings.staging_subdir()).await?;
        fs::create_dir_all(self.settings.output_dir()).await?;
        Ok(())
    }

    fn check_host(&self) -> Result<()> {
        let host = self.settings.host_os();
        if !SUPPORTED_HOSTS.contains(&host) {
            return Err(ReleaseError::UnsupportedPlatform {
                platform: host.to_string(),
            });
        }
        Ok(())
    }

    async fn compile(&self) -> Result<()> {
        log::info!("Compiling plugins");
        let flags = self.request.compiler_flags();
        let status = NativeCompiler::new(self.settings, &self.resolver)
            .compile(&flags, self.request.cross_compile_windows)
            .await
            .map_err(|e| ReleaseError::CompilerFailure {
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ReleaseError::CompilerFailure {
                reason: format!("build tool exited with {status}"),
            });
        }
        Ok(())
    }

    /// Reads the package version for logging; blank when unavailable.
    async fn version(&self) -> String {
        let source = self.settings.metadata_source();
        match read_version(source).await {
            Ok(version) => version,
            Err(e) => {
                log::warn!("No version in {}: {}", source.display(), e);
                String::new()
            }
        }
    }

    async fn package(
        &self,
        version: &str,
        discovered: &[DiscoveredArtifact],
    ) -> Result<Vec<Bundle>> {
        let bundles = BundlePackager::new(self.settings)
            .package(version, discovered)
            .await?;
        for bundle in &bundles {
            if let Some(path) = &bundle.output_archive_path {
                log::info!("Wrote {}", path.display());
            }
        }
        Ok(bundles)
    }
}
