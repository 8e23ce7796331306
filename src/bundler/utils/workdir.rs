//! Scoped changes of the process working directory.

use crate::bundler::error::{ErrorExt, Result};
use std::path::{Path, PathBuf};

/// Working directory held for the lifetime of the guard.
///
/// [`DirectoryScope::enter`] records the current directory and switches to
/// a new one; dropping the guard switches back. The restore runs on every
/// exit path, including `?` returns and panics unwinding through the scope.
#[derive(Debug)]
#[must_use = "the previous directory is restored when the scope is dropped"]
pub struct DirectoryScope {
    previous: PathBuf,
}

impl DirectoryScope {
    /// Enters `dir`, remembering the current directory.
    pub fn enter(dir: &Path) -> Result<Self> {
        let previous = std::env::current_dir().fs_context("reading working directory", ".")?;
        std::env::set_current_dir(dir).fs_context("changing working directory", dir)?;
        log::debug!("Entered {}", dir.display());
        Ok(Self { previous })
    }

    /// Directory that will be restored on drop.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for DirectoryScope {
    fn drop(&mut self) {
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            log::error!(
                "Failed to restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}
