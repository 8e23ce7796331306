//! Pipeline-level error types and their process exit codes.
//!
//! Recoverable conditions (a missing platform binary, a missing version token,
//! a failed cross-compile step) never reach this type; they are logged where
//! they occur. Everything here terminates the pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Exit code for I/O, configuration and other unclassified failures.
pub const EXIT_GENERIC: i32 = 1;
/// Exit code when the host build tool reports failure.
pub const EXIT_COMPILER_FAILURE: i32 = 2;
/// Exit code when compilation succeeded but no plugin binary was found.
pub const EXIT_ZERO_ARTIFACTS: i32 = 3;
/// Exit code when the interpreter executable cannot be located.
pub const EXIT_INTERPRETER_NOT_FOUND: i32 = 4;
/// Exit code for a host operating system the build does not know.
pub const EXIT_UNSUPPORTED_PLATFORM: i32 = 198;

/// Fatal errors of the release pipeline
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// Host operating system is outside the supported set
    #[error("Don't know platform '{platform}'; compile manually")]
    UnsupportedPlatform {
        /// Operating system name as reported by the toolchain
        platform: String,
    },

    /// Host build tool failed or could not be started
    #[error("Failed to build plugins: {reason}")]
    CompilerFailure {
        /// What went wrong
        reason: String,
    },

    /// Build reported success yet no platform binary is discoverable
    #[error(
        "Could not find any plugin despite build exit with 0 status (looked for: {})",
        searched.join(", ")
    )]
    ZeroArtifactAnomaly {
        /// Binary file names that were searched for
        searched: Vec<String>,
    },

    /// Interpreter executable could not be resolved
    #[error("Could not find interpreter executable '{executable}'")]
    InterpreterNotFound {
        /// Name or path that was looked up
        executable: String,
    },

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Process exit code for this error.
    ///
    /// Each fatal class has its own code so callers can tell a broken
    /// toolchain from a broken artifact layout.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedPlatform { .. } => EXIT_UNSUPPORTED_PLATFORM,
            Self::CompilerFailure { .. } => EXIT_COMPILER_FAILURE,
            Self::ZeroArtifactAnomaly { .. } => EXIT_ZERO_ARTIFACTS,
            Self::InterpreterNotFound { .. } => EXIT_INTERPRETER_NOT_FOUND,
            Self::Cli(_) | Self::Bundler(_) => EXIT_GENERIC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_errors_have_distinct_exit_codes() {
        let codes = [
            ReleaseError::UnsupportedPlatform {
                platform: "plan9".into(),
            }
            .exit_code(),
            ReleaseError::CompilerFailure {
                reason: "exit status 2".into(),
            }
            .exit_code(),
            ReleaseError::ZeroArtifactAnomaly { searched: vec![] }.exit_code(),
            ReleaseError::InterpreterNotFound {
                executable: "stata".into(),
            }
            .exit_code(),
            ReleaseError::Bundler(crate::bundler::Error::GenericError("disk".into())).exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(codes[0], 198);
    }

    #[test]
    fn anomaly_message_lists_searched_binaries() {
        let err = ReleaseError::ZeroArtifactAnomaly {
            searched: vec!["parquet_unix.plugin".into(), "parquet_macosx.plugin".into()],
        };
        let message = err.to_string();
        assert!(message.contains("parquet_unix.plugin, parquet_macosx.plugin"));
    }
}
