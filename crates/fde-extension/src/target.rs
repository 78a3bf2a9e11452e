//! Extension build targets.

use std::path::PathBuf;

use fde_flags::FlagSet;
use serde::{Deserialize, Serialize};

/// One declared native extension module.
///
/// The orchestrator extends the argument and include lists in place; each
/// target receives its own copies of the negotiated configuration, never a
/// shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExtensionTarget {
    /// Module name (e.g. "fde").
    pub name: String,
    /// C++ source files.
    pub sources: Vec<PathBuf>,
    /// Include directories.
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
    /// Compile arguments.
    #[serde(default)]
    pub compile_args: Vec<String>,
    /// Link arguments.
    #[serde(default)]
    pub link_args: Vec<String>,
}

impl ExtensionTarget {
    pub fn new(name: impl Into<String>, sources: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            sources,
            include_dirs: Vec::new(),
            compile_args: Vec::new(),
            link_args: Vec::new(),
        }
    }

    /// Extend this target with copies of the negotiated flags and includes.
    pub fn apply(&mut self, flags: &FlagSet, includes: &[PathBuf]) {
        self.compile_args.extend(flags.compile.iter().cloned());
        self.link_args.extend(flags.link.iter().cloned());
        self.include_dirs.extend(includes.iter().cloned());
    }
}
