//! External tool settings: the native build tool and the interpreter.

use std::{collections::BTreeMap, path::PathBuf};

/// How the external build tool is invoked.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildToolSettings {
    /// Executable name or path (`make`).
    pub program: String,

    /// Target that removes build outputs.
    pub clean_target: String,

    /// Leading arguments that switch the tool to the windows cross target.
    ///
    /// Example: `["EXECUTION=windows"]`
    pub cross_args: Vec<String>,

    /// Dependency target built before the cross-compiled plugin.
    pub cross_dependency_target: String,
}

impl Default for BuildToolSettings {
    fn default() -> Self {
        Self {
            program: "make".into(),
            clean_target: "clean".into(),
            cross_args: vec!["EXECUTION=windows".into()],
            cross_dependency_target: "spooky".into(),
        }
    }
}

/// How the statistical-package interpreter is located and invoked.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterpreterSettings {
    /// Executable searched on the search path when no override is given.
    pub program: String,

    /// Directory holding a local install, tried when `program` is not on
    /// the search path. The interpreter runs from this directory when it
    /// is used.
    ///
    /// Default: `~/.local/stata13`
    pub fallback_dir: Option<PathBuf>,

    /// Arguments placed before the script path.
    pub default_args: String,

    /// Extra environment for every interpreter run.
    pub env: BTreeMap<String, String>,
}

impl Default for InterpreterSettings {
    fn default() -> Self {
        Self {
            program: "stata".into(),
            fallback_dir: dirs::home_dir().map(|home| home.join(".local").join("stata13")),
            default_args: "-b do".into(),
            env: BTreeMap::from([("LD_LIBRARY_PATH".into(), "/usr/local/lib64".into())]),
        }
    }
}
