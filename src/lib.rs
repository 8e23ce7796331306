//! Release builder library for the parquet Stata plugin
//!
//! This library provides the release pipeline:
//! - compiling the plugin binaries through the external build tool
//! - staging the build tree the interpreter installs from
//! - writing the release and package-repository zip archives
//! - reinstalling and testing the package through the interpreter
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;
pub mod request;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
pub use request::BuildRequest;
