//! External tool detection.
//!
//! Executables are located by trying an ordered list of [`Candidate`]s and
//! stopping at the first hit. Not finding a tool is an ordinary outcome,
//! so every lookup returns an `Option`. Nothing is cached between lookups.

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
};

/// One place an executable may live.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Candidate {
    /// A literal path (relative paths are taken from the base directory).
    Direct(PathBuf),
    /// A bare name looked up in each search-path directory, in order.
    SearchPath(String),
    /// A bare name inside one configured directory.
    InDirectory {
        /// Directory to look in
        dir: PathBuf,
        /// Executable name
        name: String,
    },
}

impl Candidate {
    /// Direct path when `program` contains a directory separator, search
    /// path lookup otherwise.
    pub fn for_program(program: &str) -> Self {
        if has_separator(program) {
            Self::Direct(PathBuf::from(program))
        } else {
            Self::SearchPath(program.to_string())
        }
    }
}

/// An executable that was found, and the candidate that found it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resolved {
    pub path: PathBuf,
    pub candidate: Candidate,
}

/// Resolves executables against a fixed search path.
#[derive(Clone, Debug)]
pub struct PathResolver {
    search_path: Option<OsString>,
    base_dir: PathBuf,
}

impl PathResolver {
    /// `search_path` uses the platform `PATH` syntax; `base_dir` anchors
    /// relative direct paths.
    pub fn new(search_path: Option<&OsStr>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            search_path: search_path.map(OsStr::to_os_string),
            base_dir: base_dir.into(),
        }
    }

    /// Resolves a program given as a path or a bare name.
    pub fn resolve(&self, program: &str) -> Option<PathBuf> {
        self.resolve_first(&[Candidate::for_program(program)])
            .map(|resolved| resolved.path)
    }

    /// Tries each candidate in order and returns the first executable found.
    pub fn resolve_first(&self, candidates: &[Candidate]) -> Option<Resolved> {
        candidates.iter().find_map(|candidate| {
            let path = match candidate {
                Candidate::Direct(path) => self.check_direct(path),
                Candidate::SearchPath(name) => self.search(name),
                Candidate::InDirectory { dir, name } => self.check_direct(&dir.join(name)),
            }?;
            log::debug!("Found {:?} at: {}", candidate, path.display());
            Some(Resolved {
                path,
                candidate: candidate.clone(),
            })
        })
    }

    fn check_direct(&self, path: &Path) -> Option<PathBuf> {
        let path = self.base_dir.join(path);
        is_executable(&path).then_some(path)
    }

    fn search(&self, name: &str) -> Option<PathBuf> {
        let paths = self.search_path.as_ref()?;
        match which::which_in(name, Some(paths), &self.base_dir) {
            Ok(path) => Some(path),
            Err(e) => {
                log::debug!("{name} not found in search path: {e}");
                None
            }
        }
    }
}

fn has_separator(program: &str) -> bool {
    program.contains('/') || program.contains(std::path::MAIN_SEPARATOR)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn make_exe(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn bare_name_searches_path_in_order() {
        let tmp = TempDir::new().unwrap();
        let first = tmp.path().join("first");
        let second = tmp.path().join("second");
        std::fs::create_dir_all(&first).unwrap();
        std::fs::create_dir_all(&second).unwrap();
        make_exe(&second, "stata");
        let expected = make_exe(&first, "stata");

        let search = std::env::join_paths([&first, &second]).unwrap();
        let resolver = PathResolver::new(Some(&search), tmp.path());
        assert_eq!(resolver.resolve("stata"), Some(expected));
    }

    #[test]
    fn path_with_separator_is_checked_directly() {
        let tmp = TempDir::new().unwrap();
        let bin = tmp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let exe = make_exe(&bin, "stata");

        // The search path is irrelevant for direct paths.
        let resolver = PathResolver::new(None, tmp.path());
        assert_eq!(resolver.resolve("bin/stata"), Some(exe.clone()));
        assert_eq!(resolver.resolve(exe.to_str().unwrap()), Some(exe));
        assert_eq!(resolver.resolve("bin/missing"), None);
    }

    #[test]
    fn non_executable_files_are_not_found() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("stata"), "data").unwrap();
        let resolver = PathResolver::new(Some(tmp.path().as_os_str()), tmp.path());
        assert_eq!(resolver.resolve("./stata"), None);
        assert_eq!(resolver.resolve("stata"), None);
    }

    #[test]
    fn falls_back_to_configured_directory() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("empty");
        let local = tmp.path().join("stata13");
        std::fs::create_dir_all(&empty).unwrap();
        std::fs::create_dir_all(&local).unwrap();
        let exe = make_exe(&local, "stata");

        let resolver = PathResolver::new(Some(empty.as_os_str()), tmp.path());
        let fallback = Candidate::InDirectory {
            dir: local.clone(),
            name: "stata".into(),
        };
        let resolved = resolver
            .resolve_first(&[Candidate::SearchPath("stata".into()), fallback.clone()])
            .unwrap();
        assert_eq!(resolved.path, exe);
        assert_eq!(resolved.candidate, fallback);
    }

    #[test]
    fn nothing_found_is_none() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::new(Some(tmp.path().as_os_str()), tmp.path());
        assert_eq!(resolver.resolve_first(&[]), None);
        assert_eq!(resolver.resolve("definitely-not-installed"), None);
    }
}
