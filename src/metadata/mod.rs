//! Project metadata: the version token and the optional `release.toml`.

use crate::bundler::{
    FixedFile, Platform,
    error::{Error, ErrorExt, Result},
};
use regex::Regex;
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Name of the layout configuration looked up in the project root.
pub const MANIFEST_FILE_NAME: &str = "release.toml";

/// Digits optionally followed by a dot, repeated.
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?)+").expect("version pattern is a valid regex"));

/// Extracts the first version token from a metadata line.
///
/// `"*! version 1.4.2 some text"` yields `"1.4.2"`, `"2"` yields `"2"`.
///
/// # Errors
///
/// [`Error::VersionNotFound`] when the line holds no digit run.
pub fn resolve_version(line: &str) -> Result<String> {
    VERSION_PATTERN
        .find(line)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::VersionNotFound(line.to_string()))
}

/// Reads the first line of `path` and extracts its version token.
pub async fn read_version(path: &Path) -> Result<String> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .fs_context("reading version metadata", path)?;
    resolve_version(contents.lines().next().unwrap_or_default())
}

/// Layout overrides read from `release.toml`.
///
/// Every field is optional; anything left out keeps the parquet defaults.
///
/// ```toml
/// package = "parquet"
/// staging_dir = "build"
///
/// [plugins]
/// fallback_dir = "lib/plugin"
/// platforms = ["unix", "macosx"]
///
/// [build_tool]
/// program = "gmake"
///
/// [interpreter]
/// fallback_dir = "~/.local/stata13"
/// env = { LD_LIBRARY_PATH = "/usr/local/lib64" }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseManifest {
    pub package: Option<String>,
    pub staging_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub metadata_source: Option<PathBuf>,
    pub test_file: Option<String>,
    pub archives: ArchivesManifest,
    /// Replaces the default file tiers as a whole when present.
    pub files: Option<FilesManifest>,
    pub plugins: PluginsManifest,
    pub build_tool: BuildToolManifest,
    pub interpreter: InterpreterManifest,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchivesManifest {
    pub release: Option<String>,
    pub repository: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesManifest {
    pub repository: Vec<FixedFile>,
    pub release: Vec<FixedFile>,
    pub build: Vec<FixedFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginsManifest {
    pub fallback_dir: Option<PathBuf>,
    pub platforms: Option<Vec<Platform>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildToolManifest {
    pub program: Option<String>,
    pub clean_target: Option<String>,
    pub cross_args: Option<Vec<String>>,
    pub cross_dependency_target: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterpreterManifest {
    pub program: Option<String>,
    pub fallback_dir: Option<String>,
    pub args: Option<String>,
    pub env: Option<BTreeMap<String, String>>,
}

/// Parses a manifest from TOML text. `path` is only used in errors.
pub fn parse_manifest(text: &str, path: &Path) -> Result<ReleaseManifest> {
    toml::from_str(text).map_err(|error| Error::Config {
        path: path.to_path_buf(),
        error,
    })
}

/// Loads the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<ReleaseManifest> {
    let text = std::fs::read_to_string(path).fs_context("reading release manifest", path)?;
    parse_manifest(&text, path)
}

/// Loads `explicit` if given, else `<project_root>/release.toml` when it
/// exists, else the defaults.
pub fn discover_manifest(project_root: &Path, explicit: Option<&Path>) -> Result<ReleaseManifest> {
    if let Some(path) = explicit {
        return load_manifest(path);
    }
    let implicit = project_root.join(MANIFEST_FILE_NAME);
    if implicit.is_file() {
        log::debug!("Using layout configuration {}", implicit.display());
        load_manifest(&implicit)
    } else {
        Ok(ReleaseManifest::default())
    }
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/").or_else(|| path.strip_prefix('~')) {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}
