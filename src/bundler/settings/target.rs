//! Plugin platform targets and where their binaries are expected.

use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Operating system family a plugin binary is built for.
///
/// The binary file name carries the lowercase name of the variant,
/// e.g. `parquet_macosx.plugin`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux and other unix hosts
    Unix,
    /// Windows, built natively or cross-compiled from unix
    Windows,
    /// macOS
    Macosx,
}

impl Platform {
    /// All platforms in packaging order.
    pub const ALL: [Platform; 3] = [Platform::Unix, Platform::Windows, Platform::Macosx];

    /// Lowercase name used in binary file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Unix => "unix",
            Platform::Windows => "windows",
            Platform::Macosx => "macosx",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plugin binary to look for after compilation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlatformTarget {
    platform: Platform,
    binary_file_name: String,
    primary_search_dir: PathBuf,
    fallback_search_dir: PathBuf,
}

impl PlatformTarget {
    /// Creates a target searched first in `primary_search_dir`, then in
    /// `fallback_search_dir`.
    pub fn new(
        platform: Platform,
        binary_file_name: impl Into<String>,
        primary_search_dir: impl Into<PathBuf>,
        fallback_search_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            platform,
            binary_file_name: binary_file_name.into(),
            primary_search_dir: primary_search_dir.into(),
            fallback_search_dir: fallback_search_dir.into(),
        }
    }

    /// Default binary file name for `package` on `platform`.
    pub fn default_binary_name(package: &str, platform: Platform) -> String {
        format!("{package}_{platform}.plugin")
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn binary_file_name(&self) -> &str {
        &self.binary_file_name
    }

    pub fn primary_search_dir(&self) -> &Path {
        &self.primary_search_dir
    }

    pub fn fallback_search_dir(&self) -> &Path {
        &self.fallback_search_dir
    }

    /// Candidate locations in search order.
    pub fn candidates(&self) -> [PathBuf; 2] {
        [
            self.primary_search_dir.join(&self.binary_file_name),
            self.fallback_search_dir.join(&self.binary_file_name),
        ]
    }
}
