//! File system utilities for staging.
//!
//! Idempotent directory creation, copies that create their destination
//! directory, moves, and best-effort removal that treats absence as a
//! normal outcome.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path.
///
/// An existing directory is success; any other failure is returned.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    match fs::create_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(e).fs_context("creating directory", path),
    }
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Removes a file, reporting whether it existed.
///
/// `Ok(false)` means there was nothing to remove.
pub async fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).fs_context("removing file", path),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        create_dir_all(dest_dir).await?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Moves a file, replacing the destination.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await.fs_context("moving file", from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn create_dir_all_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("build").join("parquet");
        create_dir_all(&dir).await.unwrap();
        create_dir_all(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn create_dir_all_fails_over_a_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("releases");
        std::fs::write(&file, "not a dir").unwrap();
        assert!(create_dir_all(&file).await.is_err());
    }

    #[tokio::test]
    async fn copy_file_creates_parent() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("parquet.ado");
        std::fs::write(&src, "*! version 1.0.0").unwrap();
        let dst = tmp.path().join("build").join("parquet.ado");

        copy_file(&src, &dst).await.unwrap();
        assert_eq!(std::fs::read_to_string(dst).unwrap(), "*! version 1.0.0");
    }

    #[tokio::test]
    async fn copy_file_rejects_missing_source() {
        let tmp = TempDir::new().unwrap();
        let err = copy_file(&tmp.path().join("nope"), &tmp.path().join("dst"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[tokio::test]
    async fn remove_reports_absence() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("stata.toc");
        std::fs::write(&file, "v 3").unwrap();
        assert!(remove_file_if_exists(&file).await.unwrap());
        assert!(!remove_file_if_exists(&file).await.unwrap());
        remove_dir_all(&tmp.path().join("gone")).await.unwrap();
    }
}
