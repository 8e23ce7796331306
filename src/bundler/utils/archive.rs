//! Zip archive writing.
//!
//! Archives are written to a temporary file next to their destination and
//! renamed into place only once the central directory has been written, so
//! an interrupted write never leaves a truncated archive under the final
//! name.

use crate::bundler::error::{Context, ErrorExt, Result};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// One archive member: its path inside the zip and the file it is read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArchiveEntry {
    /// Path inside the archive, `/`-separated
    pub archive_path: String,
    /// File on disk
    pub source: PathBuf,
}

impl ArchiveEntry {
    pub fn new(archive_path: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            source: source.into(),
        }
    }
}

/// Writes `entries`, in order, into a zip at `dest`, replacing any
/// existing archive.
pub async fn write_zip(dest: &Path, entries: &[ArchiveEntry]) -> Result<()> {
    let dest = dest.to_path_buf();
    let entries = entries.to_vec();

    // zip is synchronous; keep it off the async worker threads
    tokio::task::spawn_blocking(move || write_zip_blocking(&dest, &entries)).await?
}

fn write_zip_blocking(dest: &Path, entries: &[ArchiveEntry]) -> Result<()> {
    let dir = dest
        .parent()
        .context(format!("{dest:?} has no parent directory"))?;
    let staged = tempfile::Builder::new()
        .prefix(".partial-")
        .suffix(".zip")
        .tempfile_in(dir)
        .fs_context("creating temporary archive", dir)?;

    let mut zip = ZipWriter::new(staged.reopen().fs_context("opening temporary archive", staged.path())?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        let mut source = File::open(&entry.source).fs_context("opening archive member", &entry.source)?;
        zip.start_file(entry.archive_path.as_str(), options)?;
        io::copy(&mut source, &mut zip).fs_context("compressing archive member", &entry.source)?;
        log::info!("\t{}", entry.archive_path);
    }
    zip.finish()?;

    // Dropping `staged` on any earlier return deletes the partial file.
    staged
        .persist(dest)
        .map_err(|e| e.error)
        .fs_context("committing archive", dest)?;
    Ok(())
}
