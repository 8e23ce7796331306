//! Bundle assembly: the build tree and the two distribution archives.
//!
//! # Bundles
//!
//! | Bundle | Location | Members |
//! |---|---|---|
//! | build tree | `build/` | all build files (install source) |
//! | release | `releases/<pkg>-latest.zip` | release files + plugins, under `<pkg>/` |
//! | repository | `releases/<pkg>-ssc.zip` | repository files + plugins, flat |
//!
//! Fixed files are written in declaration order and plugin binaries last,
//! so archive layouts are reproducible between runs.

use crate::bundler::{
    Result, Settings,
    builder::{DiscoveredArtifact, artifacts, checksum::calculate_sha256},
    error::Context,
    utils::{ArchiveEntry, fs, write_zip},
};
use std::path::{Path, PathBuf};

/// Which of the three bundles a [`Bundle`] is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BundleKind {
    /// Staged files the installer reads from
    BuildTree,
    /// Public release archive
    Release,
    /// Package-repository archive
    Repository,
}

/// A bundle produced by one packaging run.
#[derive(Clone, Debug)]
pub struct Bundle {
    pub kind: BundleKind,
    /// Archive written for this bundle; `None` for the build tree.
    pub output_archive_path: Option<PathBuf>,
    /// Members in write order.
    pub members: Vec<ArchiveEntry>,
}

impl Bundle {
    /// Member paths as they appear in the bundle.
    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.archive_path.as_str()).collect()
    }
}

/// Stages files and writes the distribution archives.
#[derive(Debug)]
pub struct BundlePackager<'a> {
    settings: &'a Settings,
}

impl<'a> BundlePackager<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Produces the build tree, the release archive and the repository
    /// archive, in that order.
    ///
    /// Artifacts that were not found are left out of both archives; the
    /// caller has already rejected a run where none were found.
    pub async fn package(
        &self,
        version: &str,
        discovered: &[DiscoveredArtifact],
    ) -> Result<Vec<Bundle>> {
        let build_tree = self.stage_build_tree(discovered).await?;
        let plugins: Vec<String> = artifacts::found(discovered)
            .map(|a| a.target().binary_file_name().to_string())
            .collect();

        log::info!(
            "Compressing build files for {}-{}",
            self.settings.package_name(),
            version
        );
        let release = self.write_release(&plugins).await?;

        log::info!(
            "Compressing build files for {}",
            self.settings
                .repository_archive_path()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        );
        let repository = self.write_repository(&plugins).await?;

        Ok(vec![build_tree, release, repository])
    }

    /// Copies the fixed build files and any plugin found outside the
    /// staging directory into the staging directory.
    async fn stage_build_tree(&self, discovered: &[DiscoveredArtifact]) -> Result<Bundle> {
        let staging = self.settings.staging_dir();
        let root = self.settings.project_root();

        let mut members = Vec::new();
        for file in self.settings.files().build_set() {
            let dest = staging.join(&file.name);
            fs::copy_file(&file.source_in(root), &dest).await?;
            members.push(ArchiveEntry::new(file.name.clone(), dest));
        }

        for artifact in artifacts::found(discovered) {
            let Some(source) = artifact.resolved_path() else {
                continue;
            };
            let dest = staging.join(artifact.target().binary_file_name());
            if source != dest {
                log::debug!("Copying {} into {}", source.display(), staging.display());
                fs::copy_file(source, &dest).await?;
            }
        }

        Ok(Bundle {
            kind: BundleKind::BuildTree,
            output_archive_path: None,
            members,
        })
    }

    /// Moves the release members under the staging subfolder, archives
    /// them there, and moves them back out.
    async fn write_release(&self, plugins: &[String]) -> Result<Bundle> {
        let staging = self.settings.staging_dir();
        let subdir = self.settings.staging_subdir();
        let package = self.settings.package_name();
        let dest = self.settings.release_archive_path();

        let names: Vec<String> = self
            .settings
            .files()
            .release_set()
            .into_iter()
            .map(|f| f.name.clone())
            .chain(plugins.iter().cloned())
            .collect();

        fs::create_dir_all(&subdir).await?;

        let mut moved = Vec::new();
        let mut outcome = Ok(());
        for name in &names {
            if let Err(e) = fs::move_file(&staging.join(name), &subdir.join(name)).await {
                outcome = Err(e);
                break;
            }
            moved.push(name.as_str());
        }

        let members: Vec<ArchiveEntry> = names
            .iter()
            .map(|name| ArchiveEntry::new(format!("{package}/{name}"), subdir.join(name)))
            .collect();
        if outcome.is_ok() {
            outcome = write_zip(&dest, &members)
                .await
                .context(format!("writing {}", dest.display()));
        }

        // Members go back to the build tree whether or not the write worked.
        let restored = restore_members(&moved, &subdir, staging).await;
        if restored.is_ok() {
            if let Err(e) = fs::remove_dir_all(&subdir).await {
                if outcome.is_ok() {
                    outcome = Err(e);
                } else {
                    log::warn!("Failed to remove {}: {}", subdir.display(), e);
                }
            }
        } else {
            log::warn!("Leaving {} in place", subdir.display());
        }
        outcome?;
        restored?;

        log_checksum(&dest).await;
        Ok(Bundle {
            kind: BundleKind::Release,
            output_archive_path: Some(dest),
            members: restage(members, staging),
        })
    }

    /// Archives the repository members flat, straight from the build tree.
    async fn write_repository(&self, plugins: &[String]) -> Result<Bundle> {
        let staging = self.settings.staging_dir();
        let dest = self.settings.repository_archive_path();

        let members: Vec<ArchiveEntry> = self
            .settings
            .files()
            .repository_set()
            .into_iter()
            .map(|f| f.name.clone())
            .chain(plugins.iter().cloned())
            .map(|name| {
                let source = staging.join(&name);
                ArchiveEntry::new(name, source)
            })
            .collect();

        write_zip(&dest, &members)
            .await
            .context(format!("writing {}", dest.display()))?;
        log_checksum(&dest).await;
        Ok(Bundle {
            kind: BundleKind::Repository,
            output_archive_path: Some(dest),
            members,
        })
    }
}

/// Moves each named file from `from` back into `to`.
///
/// Every name is attempted; the first failure is returned.
async fn restore_members(names: &[&str], from: &Path, to: &Path) -> Result<()> {
    let mut result = Ok(());
    for name in names {
        if let Err(e) = fs::move_file(&from.join(name), &to.join(name)).await {
            log::error!("Failed to restore {name} to the build tree: {e}");
            if result.is_ok() {
                result = Err(e);
            }
        }
    }
    result
}

/// Points release members at their restored build-tree location.
fn restage(members: Vec<ArchiveEntry>, staging: &Path) -> Vec<ArchiveEntry> {
    members
        .into_iter()
        .map(|mut m| {
            if let Some(name) = m.source.file_name() {
                m.source = staging.join(name);
            }
            m
        })
        .collect()
}

async fn log_checksum(path: &Path) {
    match calculate_sha256(path).await {
        Ok(sum) => log::info!("{}: sha256 {}", path.display(), sum),
        Err(e) => log::warn!("Could not checksum {}: {}", path.display(), e),
    }
}
