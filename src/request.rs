//! The immutable set of flags driving one release run.

use std::path::PathBuf;

/// What the invocation asked for.
///
/// Built once from the command line and passed by reference into every
/// phase; nothing downstream reads process arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildRequest {
    /// Run the clean phase only, then exit 0.
    pub clean_requested: bool,
    /// Reinstall the package through the interpreter after packaging.
    pub replace_requested: bool,
    /// Run the interpreter test script after packaging.
    pub test_requested: bool,
    /// Additionally cross-build the windows plugin.
    pub cross_compile_windows: bool,
    /// Interpreter executable override.
    pub interpreter_path: Option<PathBuf>,
    /// Interpreter argument override.
    pub interpreter_args: Option<String>,
    /// Flags forwarded to the build tool.
    pub compiler_flags: Option<String>,
}

impl BuildRequest {
    /// Build tool flags split on whitespace.
    pub fn compiler_flags(&self) -> Vec<String> {
        split_args(self.compiler_flags.as_deref().unwrap_or_default())
    }

    /// Whether any phase needs the interpreter.
    pub fn needs_interpreter(&self) -> bool {
        self.replace_requested || self.test_requested
    }
}

/// Splits a flag string the way a shell would for simple, unquoted input.
pub(crate) fn split_args(flags: &str) -> Vec<String> {
    flags.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiler_flags_split_on_whitespace() {
        let request = BuildRequest {
            compiler_flags: Some("  -j4   DEBUG=1 ".into()),
            ..Default::default()
        };
        assert_eq!(request.compiler_flags(), ["-j4", "DEBUG=1"]);
        assert!(BuildRequest::default().compiler_flags().is_empty());
    }

    #[test]
    fn interpreter_needed_only_for_install_or_test() {
        assert!(!BuildRequest::default().needs_interpreter());
        let request = BuildRequest {
            test_requested: true,
            ..Default::default()
        };
        assert!(request.needs_interpreter());
    }
}
