//! Plugin binary discovery after compilation.

use crate::bundler::{Platform, PlatformTarget};
use crate::error::{ReleaseError, Result};
use std::path::{Path, PathBuf};

/// Outcome of looking for one target's binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiscoveredArtifact {
    target: PlatformTarget,
    resolved_path: Option<PathBuf>,
}

impl DiscoveredArtifact {
    pub fn target(&self) -> &PlatformTarget {
        &self.target
    }

    pub fn found(&self) -> bool {
        self.resolved_path.is_some()
    }

    /// Where the binary was found: the primary location if present there,
    /// otherwise the fallback.
    pub fn resolved_path(&self) -> Option<&Path> {
        self.resolved_path.as_deref()
    }
}

/// Looks for each target's binary, primary directory first.
///
/// A missing binary is logged and recorded as not found; it never fails the
/// collection. Results keep the order of `targets`.
pub fn collect(targets: &[PlatformTarget]) -> Vec<DiscoveredArtifact> {
    targets
        .iter()
        .map(|target| {
            let resolved_path = target.candidates().into_iter().find(|p| p.is_file());
            match &resolved_path {
                Some(path) => log::debug!("Found {} at {}", target.binary_file_name(), path.display()),
                None => log::warn!("Could not find '{}'", target.binary_file_name()),
            }
            DiscoveredArtifact {
                target: target.clone(),
                resolved_path,
            }
        })
        .collect()
}

/// Only the artifacts that were found, in target order.
pub fn found(artifacts: &[DiscoveredArtifact]) -> impl Iterator<Item = &DiscoveredArtifact> {
    artifacts.iter().filter(|a| a.found())
}

/// Platforms whose binary was not found.
pub fn missing(artifacts: &[DiscoveredArtifact]) -> Vec<Platform> {
    artifacts
        .iter()
        .filter(|a| !a.found())
        .map(|a| a.target.platform())
        .collect()
}

/// Rejects a successful build that produced nothing to package.
///
/// Only called after the build tool exited 0; a failed build is reported
/// as a compiler failure before collection.
///
/// # Errors
///
/// [`ReleaseError::ZeroArtifactAnomaly`] when no artifact was found.
pub fn verify(artifacts: &[DiscoveredArtifact]) -> Result<()> {
    if !artifacts.iter().any(DiscoveredArtifact::found) {
        return Err(ReleaseError::ZeroArtifactAnomaly {
            searched: artifacts
                .iter()
                .map(|a| a.target.binary_file_name().to_string())
                .collect(),
        });
    }
    Ok(())
}
