//! Command line interface for the release builder.
//!
//! Parses arguments, assembles [`Settings`](crate::bundler::Settings) from
//! the project layout file, and runs the [`BuildDriver`].

mod args;

pub use args::Args;

use crate::{
    bundler::{BuildDriver, Outcome, SettingsBuilder},
    error::{CliError, Result},
    metadata::discover_manifest,
    request::BuildRequest,
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Runs the release described by already parsed arguments.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let manifest = discover_manifest(&args.project_dir, args.config.as_deref())?;
    let settings = SettingsBuilder::new()
        .project_root(&args.project_dir)
        .manifest(manifest)
        .build()?;
    log::debug!("Project root: {}", settings.project_root().display());

    let request = BuildRequest::from(args);
    match BuildDriver::new(&settings, &request).run().await? {
        Outcome::Cleaned => log::info!("Clean finished"),
        Outcome::Built(report) => {
            let version = if report.version.is_empty() {
                "unknown version".to_string()
            } else {
                report.version.clone()
            };
            log::info!(
                "Built {} ({}) into {}",
                settings.package_name(),
                version,
                settings.output_dir().display()
            );
            if report.test_status.is_some_and(|status| !status.success()) {
                log::warn!("Tests did not pass; see the log in the build tree");
            }
        }
    }
    Ok(0)
}
