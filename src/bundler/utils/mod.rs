//! Shared helpers for staging, archiving and running external tools.

pub mod archive;
pub mod fs;
pub mod process;
pub mod workdir;

pub use archive::{ArchiveEntry, write_zip};
pub use process::ToolCommand;
pub use workdir::DirectoryScope;
