//! Release pipeline orchestration.
//!
//! This module provides the [`BuildDriver`] that runs one release from a
//! [`BuildRequest`](crate::request::BuildRequest): compile the plugins,
//! find the binaries, package the bundles, then optionally reinstall and
//! test through the interpreter.
//!
//! # Example
//!
//! ```no_run
//! use parquet_bundler_release::{
//!     bundler::{BuildDriver, SettingsBuilder},
//!     request::BuildRequest,
//! };
//!
//! # async fn example() -> parquet_bundler_release::Result<()> {
//! let settings = SettingsBuilder::new().project_root(".").build()?;
//! let request = BuildRequest {
//!     cross_compile_windows: true,
//!     ..Default::default()
//! };
//!
//! let outcome = BuildDriver::new(&settings, &request).run().await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`artifacts`] - Plugin binary discovery and the zero-artifact check
//! - [`checksum`] - SHA256 checksum calculation for archives
//! - [`compile`] - Build tool invocation for host and cross targets
//! - [`orchestrator`] - Main [`BuildDriver`] and its phases
//! - [`tool_detection`] - Executable lookup through candidate lists

pub mod artifacts;
pub mod checksum;
mod compile;
mod orchestrator;
mod tool_detection;

pub use artifacts::DiscoveredArtifact;
pub use compile::NativeCompiler;
pub use orchestrator::{BuildDriver, BuildReport, Outcome};
pub use tool_detection::{Candidate, PathResolver, Resolved};
