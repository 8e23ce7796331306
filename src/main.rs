//! parquet_release - release builder for the parquet Stata plugin.
//!
//! This binary compiles the plugin binaries, stages the build tree and
//! writes the release archives, exiting with a code that names the phase
//! that failed.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    // Run CLI and get exit code
    let exit_code = match parquet_bundler_release::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
