//! Builder for constructing Settings.

use super::{
    BuildToolSettings, FixedFileSet, InterpreterSettings, Platform, PlatformTarget, Settings,
};
use crate::{
    bail,
    bundler::error::{ErrorExt, Result},
    metadata::{self, ReleaseManifest},
};
use path_absolutize::Absolutize;
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Builder for constructing [`Settings`].
///
/// Starts from the parquet defaults, applies a [`ReleaseManifest`] on top,
/// and resolves every path against the absolutized project root. The
/// ambient pieces (search path, temp dir, host OS) are captured here once
/// unless set explicitly.
///
/// # Examples
///
/// ```no_run
/// use parquet_bundler_release::bundler::SettingsBuilder;
///
/// # fn example() -> parquet_bundler_release::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/src/parquet")
///     .search_path(Some("/usr/bin:/bin".into()))
///     .build()?;
/// assert!(settings.staging_dir().ends_with("build"));
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_root: Option<PathBuf>,
    manifest: ReleaseManifest,
    search_path: Option<Option<OsString>>,
    temp_dir: Option<PathBuf>,
    host_os: Option<String>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root.
    ///
    /// Default: the current directory at build time
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Applies layout overrides.
    pub fn manifest(mut self, manifest: ReleaseManifest) -> Self {
        self.manifest = manifest;
        self
    }

    /// Sets the executable search path.
    ///
    /// Default: the `PATH` environment variable
    pub fn search_path(mut self, search_path: Option<OsString>) -> Self {
        self.search_path = Some(search_path);
        self
    }

    /// Sets the directory for temporary scripts.
    ///
    /// Default: [`std::env::temp_dir`]
    pub fn temp_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.temp_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the host operating system name.
    ///
    /// Default: [`std::env::consts::OS`]
    pub fn host_os(mut self, os: impl Into<String>) -> Self {
        self.host_os = Some(os.into());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Fails if the project root cannot be absolutized, or if the test file
    /// is not declared among the build-tree files.
    pub fn build(self) -> Result<Settings> {
        let root = self.project_root.unwrap_or_else(|| PathBuf::from("."));
        let root = root
            .absolutize()
            .fs_context("resolving project root", &root)?
            .into_owned();

        let m = self.manifest;
        let package = m.package.unwrap_or_else(|| "parquet".to_string());

        let staging_dir = root.join(m.staging_dir.unwrap_or_else(|| "build".into()));
        let output_dir = root.join(m.output_dir.unwrap_or_else(|| "releases".into()));
        let metadata_source = root.join(
            m.metadata_source
                .unwrap_or_else(|| PathBuf::from(format!("src/ado/{package}.ado"))),
        );

        let files = match m.files {
            Some(files) => FixedFileSet::new(files.repository, files.release, files.build),
            None => FixedFileSet::parquet_defaults(&package),
        };
        let test_file = m
            .test_file
            .unwrap_or_else(|| format!("{package}_tests.do"));
        if files.get(&test_file).is_none() {
            bail!("test file '{test_file}' is not declared among the build files");
        }

        let plugin_fallback = root.join(
            m.plugins
                .fallback_dir
                .unwrap_or_else(|| PathBuf::from("lib").join("plugin")),
        );
        let targets = m
            .plugins
            .platforms
            .unwrap_or_else(|| Platform::ALL.to_vec())
            .into_iter()
            .map(|platform| {
                PlatformTarget::new(
                    platform,
                    PlatformTarget::default_binary_name(&package, platform),
                    &staging_dir,
                    &plugin_fallback,
                )
            })
            .collect();

        let defaults = BuildToolSettings::default();
        let build_tool = BuildToolSettings {
            program: m.build_tool.program.unwrap_or(defaults.program),
            clean_target: m.build_tool.clean_target.unwrap_or(defaults.clean_target),
            cross_args: m.build_tool.cross_args.unwrap_or(defaults.cross_args),
            cross_dependency_target: m
                .build_tool
                .cross_dependency_target
                .unwrap_or(defaults.cross_dependency_target),
        };

        let defaults = InterpreterSettings::default();
        let interpreter = InterpreterSettings {
            program: m.interpreter.program.unwrap_or(defaults.program),
            fallback_dir: match m.interpreter.fallback_dir {
                Some(dir) => Some(metadata::expand_home(&dir)),
                None => defaults.fallback_dir,
            },
            default_args: m.interpreter.args.unwrap_or(defaults.default_args),
            env: m.interpreter.env.unwrap_or(defaults.env),
        };

        let release_archive_name = m
            .archives
            .release
            .unwrap_or_else(|| format!("{package}-latest.zip"));
        let repository_archive_name = m
            .archives
            .repository
            .unwrap_or_else(|| format!("{package}-ssc.zip"));

        Ok(Settings::new(
            package,
            root,
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
            self.search_path
                .unwrap_or_else(|| std::env::var_os("PATH")),
            self.temp_dir.unwrap_or_else(std::env::temp_dir),
            self.host_os
                .unwrap_or_else(|| std::env::consts::OS.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::parse_manifest;

    #[test]
    fn defaults_match_parquet_layout() {
        let settings = SettingsBuilder::new().project_root("/repo").build().unwrap();
        assert_eq!(settings.staging_dir(), Path::new("/repo/build"));
        assert_eq!(settings.staging_subdir(), PathBuf::from("/repo/build/parquet"));
        assert_eq!(
            settings.release_archive_path(),
            PathBuf::from("/repo/releases/parquet-latest.zip")
        );
        assert_eq!(
            settings.repository_archive_path(),
            PathBuf::from("/repo/releases/parquet-ssc.zip")
        );
        assert_eq!(
            settings.metadata_source(),
            Path::new("/repo/src/ado/parquet.ado")
        );
        assert_eq!(settings.test_file(), "parquet_tests.do");

        let targets = settings.targets();
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[1].binary_file_name(), "parquet_windows.plugin");
        assert_eq!(targets[1].primary_search_dir(), Path::new("/repo/build"));
        assert_eq!(targets[1].fallback_search_dir(), Path::new("/repo/lib/plugin"));
    }

    #[test]
    #[serial_test::serial(cwd)]
    fn relative_root_is_absolutized() {
        let settings = SettingsBuilder::new().project_root("proj").build().unwrap();
        assert!(settings.project_root().is_absolute());
        assert!(settings.project_root().ends_with("proj"));
    }

    #[test]
    fn manifest_overrides_apply() {
        let manifest = parse_manifest(
            r#"
            output_dir = "dist"

            [plugins]
            platforms = ["macosx"]

            [build_tool]
            program = "gmake"

            [interpreter]
            program = "stata-mp"
            fallback_dir = "/opt/stata17"
            "#,
            Path::new("release.toml"),
        )
        .unwrap();
        let settings = SettingsBuilder::new()
            .project_root("/repo")
            .manifest(manifest)
            .build()
            .unwrap();

        assert_eq!(settings.output_dir(), Path::new("/repo/dist"));
        assert_eq!(settings.targets().len(), 1);
        assert_eq!(settings.targets()[0].platform(), Platform::Macosx);
        assert_eq!(settings.build_tool().program, "gmake");
        assert_eq!(settings.build_tool().clean_target, "clean");
        assert_eq!(settings.interpreter().program, "stata-mp");
        assert_eq!(
            settings.interpreter().fallback_dir.as_deref(),
            Some(Path::new("/opt/stata17"))
        );
        assert_eq!(settings.interpreter().default_args, "-b do");
    }

    #[test]
    fn undeclared_test_file_is_rejected() {
        let manifest =
            parse_manifest("test_file = \"other.do\"", Path::new("release.toml")).unwrap();
        let err = SettingsBuilder::new()
            .project_root("/repo")
            .manifest(manifest)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("other.do"));
    }
}
