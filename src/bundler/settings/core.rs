//! Core Settings struct and implementations.

use super::{BuildToolSettings, FixedFileSet, InterpreterSettings, PlatformTarget};
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

/// Project layout and tool configuration for a release run.
///
/// Constructed once via [`SettingsBuilder`](super::SettingsBuilder) and
/// read-only afterwards. All paths are absolute, so no phase depends on the
/// process working directory.
///
/// # Examples
///
/// ```no_run
/// use parquet_bundler_release::bundler::SettingsBuilder;
///
/// # fn example() -> parquet_bundler_release::bundler::Result<()> {
/// let settings = SettingsBuilder::new().project_root(".").build()?;
/// println!("staging into {}", settings.staging_dir().display());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Package name; also the staging subfolder and archive root.
    package_name: String,

    /// Project root all relative paths were resolved against.
    project_root: PathBuf,

    /// Build tree (`build/`).
    staging_dir: PathBuf,

    /// Archive output directory (`releases/`).
    output_dir: PathBuf,

    /// File name of the public release archive.
    release_archive_name: String,

    /// File name of the package-repository archive.
    repository_archive_name: String,

    /// File whose first line carries the version token.
    metadata_source: PathBuf,

    /// Fixed bundle members.
    files: FixedFileSet,

    /// Name of the build-tree file dispatched by the test phase.
    test_file: String,

    /// Plugin binaries, in packaging order.
    targets: Vec<PlatformTarget>,

    build_tool: BuildToolSettings,

    interpreter: InterpreterSettings,

    /// Executable search path captured at construction.
    search_path: Option<OsString>,

    /// Directory for the generated install script.
    temp_dir: PathBuf,

    /// Host operating system (`std::env::consts::OS` unless overridden).
    host_os: String,
}

impl Settings {
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the staging directory (build tree root).
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Returns the staging subfolder used as the release archive root.
    pub fn staging_subdir(&self) -> PathBuf {
        self.staging_dir.join(&self.package_name)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Full path of the public release archive.
    pub fn release_archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.release_archive_name)
    }

    /// Full path of the package-repository archive.
    pub fn repository_archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.repository_archive_name)
    }

    pub fn metadata_source(&self) -> &Path {
        &self.metadata_source
    }

    pub fn files(&self) -> &FixedFileSet {
        &self.files
    }

    pub fn test_file(&self) -> &str {
        &self.test_file
    }

    pub fn targets(&self) -> &[PlatformTarget] {
        &self.targets
    }

    pub fn build_tool(&self) -> &BuildToolSettings {
        &self.build_tool
    }

    pub fn interpreter(&self) -> &InterpreterSettings {
        &self.interpreter
    }

    pub fn search_path(&self) -> Option<&OsStr> {
        self.search_path.as_deref()
    }

    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    pub fn host_os(&self) -> &str {
        &self.host_os
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        package_name: String,
        project_root: PathBuf,
        staging_dir: PathBuf,
        output_dir: PathBuf,
        release_archive_name: String,
        repository_archive_name: String,
        metadata_source: PathBuf,
        files: FixedFileSet,
        test_file: String,
        targets: Vec<PlatformTarget>,
        build_tool: BuildToolSettings,
        interpreter: InterpreterSettings,
        search_path: Option<OsString>,
        temp_dir: PathBuf,
        host_os: String,
    ) -> Self {
        Self {
            package_name,
            project_root,
            staging_dir,
            output_dir,
            release_archive_name,
            repository_archive_name,
            metadata_source,
            files,
            test_file,
            targets,
            build_tool,
            interpreter,
            search_path,
            temp_dir,
            host_os,
        }
    }
}
