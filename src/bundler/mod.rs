//! Release bundling for the parquet plugin.
//!
//! This module provides the pieces of a release run:
//! - project layout and tool settings ([`settings`])
//! - build tool invocation, binary discovery and the pipeline driver
//!   ([`builder`])
//! - the build tree and distribution archives ([`package`])
//! - reinstalling and testing through the interpreter ([`interpreter`])

pub mod builder;
pub mod error;
pub mod interpreter;
pub mod package;
pub mod settings;
pub mod utils;

pub use builder::{
    BuildDriver, BuildReport, Candidate, DiscoveredArtifact, NativeCompiler, Outcome,
    PathResolver, Resolved,
};
pub use error::{Context, Error, ErrorExt, Result};
pub use interpreter::{Installer, Interpreter, TestRunner};
pub use package::{Bundle, BundleKind, BundlePackager};
pub use settings::{
    BuildToolSettings, FixedFile, FixedFileSet, InterpreterSettings, Platform, PlatformTarget,
    Settings, SettingsBuilder,
};
