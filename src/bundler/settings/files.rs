//! Fixed (non-binary) files shipped in each bundle.
//!
//! Files are declared in three tiers. The repository tier goes everywhere,
//! the release tier adds files to the release archive and the build tree,
//! and the build tier adds files that only live in the build tree. Deriving
//! the member lists from the tiers keeps `repository ⊆ release ⊆ build`
//! true for any configuration.

use std::path::{Path, PathBuf};

/// A fixed file: its name inside bundles and where it comes from.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize)]
pub struct FixedFile {
    /// File name inside the staging directory and the archives
    pub name: String,
    /// Source path, relative to the project root unless absolute
    pub source: PathBuf,
}

impl FixedFile {
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Source path resolved against `root`.
    pub fn source_in(&self, root: &Path) -> PathBuf {
        root.join(&self.source)
    }
}

/// The three tiers of fixed files.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FixedFileSet {
    repository: Vec<FixedFile>,
    release_only: Vec<FixedFile>,
    build_only: Vec<FixedFile>,
}

impl FixedFileSet {
    pub fn new(
        repository: Vec<FixedFile>,
        release_only: Vec<FixedFile>,
        build_only: Vec<FixedFile>,
    ) -> Self {
        Self {
            repository,
            release_only,
            build_only,
        }
    }

    /// Default layout of the parquet package.
    pub fn parquet_defaults(package: &str) -> Self {
        Self::new(
            vec![
                FixedFile::new(format!("{package}.ado"), format!("src/ado/{package}.ado")),
                FixedFile::new(format!("{package}.sthlp"), format!("docs/{package}.sthlp")),
            ],
            vec![
                FixedFile::new("changelog.md", "changelog.md"),
                FixedFile::new(format!("{package}.pkg"), format!("src/{package}.pkg")),
                FixedFile::new("stata.toc", "src/stata.toc"),
            ],
            vec![FixedFile::new(
                format!("{package}_tests.do"),
                format!("src/test/{package}_tests.do"),
            )],
        )
    }

    /// Files of the package-repository archive, before binaries.
    pub fn repository_set(&self) -> Vec<&FixedFile> {
        self.repository.iter().collect()
    }

    /// Files of the release archive, before binaries.
    pub fn release_set(&self) -> Vec<&FixedFile> {
        self.release_only.iter().chain(&self.repository).collect()
    }

    /// Files of the build tree.
    pub fn build_set(&self) -> Vec<&FixedFile> {
        self.release_only
            .iter()
            .chain(&self.repository)
            .chain(&self.build_only)
            .collect()
    }

    /// Looks up a file of the build tree by name.
    pub fn get(&self, name: &str) -> Option<&FixedFile> {
        self.build_set().into_iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(files: Vec<&FixedFile>) -> Vec<&str> {
        files.into_iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn default_declaration_order() {
        let set = FixedFileSet::parquet_defaults("parquet");
        assert_eq!(
            names(set.release_set()),
            [
                "changelog.md",
                "parquet.pkg",
                "stata.toc",
                "parquet.ado",
                "parquet.sthlp"
            ]
        );
        assert_eq!(names(set.build_set()).last(), Some(&"parquet_tests.do"));
    }

    #[test]
    fn tiers_nest() {
        let set = FixedFileSet::new(
            vec![FixedFile::new("a", "a")],
            vec![FixedFile::new("b", "b")],
            vec![FixedFile::new("c", "c")],
        );
        let release = names(set.release_set());
        let build = names(set.build_set());
        for name in names(set.repository_set()) {
            assert!(release.contains(&name));
        }
        for name in &release {
            assert!(build.contains(name));
        }
    }

    #[test]
    fn lookup_by_name_covers_build_tier() {
        let set = FixedFileSet::parquet_defaults("parquet");
        let test_file = set.get("parquet_tests.do").unwrap();
        assert_eq!(
            test_file.source_in(Path::new("/repo")),
            PathBuf::from("/repo/src/test/parquet_tests.do")
        );
        assert!(set.get("missing.do").is_none());
    }
}
