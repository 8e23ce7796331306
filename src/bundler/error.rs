//! Low-level error type for bundling operations.
//!
//! Filesystem, process, archive and template failures all land here. The
//! [`ErrorExt`] and [`Context`] extension traits attach a human-readable
//! description of what was being attempted, and [`bail!`](crate::bail)
//! returns early with a [`Error::GenericError`].

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result alias for bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while staging, archiving or dispatching external tools.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem operation failed on a known path.
    #[error("{context} `{}`: {error}", path.display())]
    Fs {
        /// What was being attempted
        context: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying IO error
        #[source]
        error: std::io::Error,
    },

    /// An external command could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that was attempted
        command: String,
        /// Spawn error
        #[source]
        error: std::io::Error,
    },

    /// Zip archive could not be written.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Layout configuration could not be parsed.
    #[error("invalid configuration in `{}`: {error}", path.display())]
    Config {
        /// Configuration file
        path: PathBuf,
        /// Parse error
        #[source]
        error: toml::de::Error,
    },

    /// The metadata line carried no version token.
    #[error("no version token found in {0:?}")]
    VersionNotFound(String),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Error wrapped with additional context.
    #[error("{context}: {source}")]
    Context {
        /// Description of the failed step
        context: String,
        /// Wrapped error
        #[source]
        source: Box<Error>,
    },

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Wrap an IO error with the attempted operation and the path involved.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attach a free-form description to results and options.
pub trait Context<T> {
    /// Wrap the error (or `None`) with `context`.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|source| Error::Context {
            context: context.to_string(),
            source: Box::new(source),
        })
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

/// Return early with a formatted [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($($arg)*)))
    };
}
