//! Configuration structures for release operations.
//!
//! This module provides the project layout (staging and output
//! directories, fixed bundle files, plugin targets) and the external tool
//! settings, plus the builder that assembles them from defaults and an
//! optional `release.toml`.

mod builder;
mod core;
mod files;
mod target;
mod tools;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use files::{FixedFile, FixedFileSet};
pub use target::{Platform, PlatformTarget};
pub use tools::{BuildToolSettings, InterpreterSettings};
