//! Command line argument parsing and validation.

use crate::request::BuildRequest;
use clap::Parser;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Release builder for the parquet Stata plugin
#[derive(Parser, Debug)]
#[command(
    name = "parquet_release",
    version,
    about = "Build the parquet plugin and package its release archives",
    long_about = "Compiles the plugin binaries with the build tool, stages the build tree, and writes
the release and package-repository archives. Optionally reinstalls the package
into Stata and runs its test script.

Usage:
  parquet_release
  parquet_release --windows --make-flags \"-j4\"
  parquet_release --replace --test --stata ~/stata17/stata-mp
  parquet_release --clean"
)]
pub struct Args {
    /// Path to the Stata executable
    #[arg(long, value_name = "PATH")]
    pub stata: Option<PathBuf>,

    /// Arguments passed to Stata before the script [default: -b do]
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub stata_args: Option<String>,

    /// Flags passed to the build tool, split on whitespace
    #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
    pub make_flags: Option<String>,

    /// Delete staged build files and run the build tool's clean target
    #[arg(long)]
    pub clean: bool,

    /// Reinstall the package into Stata from the build tree
    #[arg(long)]
    pub replace: bool,

    /// Run the package test script through Stata
    #[arg(long)]
    pub test: bool,

    /// Also cross-compile the windows plugin
    #[arg(long)]
    pub windows: bool,

    /// Project root containing the plugin sources
    #[arg(
        long,
        value_name = "DIR",
        env = "PARQUET_RELEASE_PROJECT_DIR",
        default_value = "."
    )]
    pub project_dir: PathBuf,

    /// Layout file [default: <project-dir>/release.toml when present]
    #[arg(long, value_name = "FILE", env = "PARQUET_RELEASE_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    ///
    /// `--clean` wins over every build flag, so combining them is allowed.
    pub fn validate(&self) -> Result<(), String> {
        if self.stata_args.as_deref().is_some_and(|a| a.trim().is_empty()) {
            return Err("--stata-args cannot be empty".to_string());
        }
        Ok(())
    }
}

impl From<&Args> for BuildRequest {
    fn from(args: &Args) -> Self {
        Self {
            clean_requested: args.clean,
            replace_requested: args.replace,
            test_requested: args.test,
            cross_compile_windows: args.windows,
            interpreter_path: args.stata.as_deref().map(from_invocation_dir),
            interpreter_args: args.stata_args.clone(),
            compiler_flags: args.make_flags.clone(),
        }
    }
}

/// Anchors a path given on the command line at the directory the tool was
/// started from, not at the project root.
fn from_invocation_dir(path: &Path) -> PathBuf {
    match path.absolutize() {
        Ok(absolute) => absolute.into_owned(),
        Err(e) => {
            log::warn!("Could not resolve {}: {}", path.display(), e);
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("parquet_release").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults_to_a_plain_build() {
        let request = BuildRequest::from(&parse(&[]));
        assert_eq!(request, BuildRequest::default());
    }

    #[test]
    fn flags_map_onto_the_request() {
        let args = parse(&[
            "--replace",
            "--test",
            "--windows",
            "--stata",
            "/opt/stata/stata-mp",
            "--stata-args",
            "-q do",
            "--make-flags",
            "-j4 DEBUG=1",
        ]);
        args.validate().unwrap();
        let request = BuildRequest::from(&args);
        assert!(request.replace_requested && request.test_requested);
        assert!(request.cross_compile_windows);
        assert_eq!(request.interpreter_path, Some(PathBuf::from("/opt/stata/stata-mp")));
        assert_eq!(request.interpreter_args.as_deref(), Some("-q do"));
        assert_eq!(request.compiler_flags(), ["-j4", "DEBUG=1"]);
    }

    #[test]
    fn clean_combines_with_build_flags() {
        let args = parse(&["--clean", "--replace", "--test", "--windows"]);
        args.validate().unwrap();
        let request = BuildRequest::from(&args);
        assert!(request.clean_requested);
        assert!(request.replace_requested);
    }

    #[test]
    fn empty_stata_args_are_rejected() {
        assert!(parse(&["--stata-args", " "]).validate().is_err());
    }

    #[test]
    #[serial(cwd)]
    fn relative_stata_path_is_taken_from_invocation_dir() {
        let cwd = std::env::current_dir().unwrap();
        let request = BuildRequest::from(&parse(&["--stata", "./bin/stata"]));
        assert_eq!(request.interpreter_path, Some(cwd.join("bin").join("stata")));
    }
}
