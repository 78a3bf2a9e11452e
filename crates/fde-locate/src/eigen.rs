//! Eigen include-path resolution with ordered fallback strategies.

use std::path::PathBuf;
use std::process::Command;

use crate::error::LocateError;

/// Well-known system locations, checked after the bundled copy in this order.
const SYSTEM_PATHS: &[&str] = &[
    "/opt/homebrew/include/eigen3",
    "/usr/local/include/eigen3",
    "/usr/include/eigen3",
];

/// Resolves the Eigen include directory.
///
/// Strategies are tried in order and the first success wins:
/// 1. a bundled `Eigen/` directory under `bundled_root` (the parent is the
///    include path);
/// 2. the fixed list of well-known system paths;
/// 3. `pkg-config --cflags-only-I eigen3`.
#[derive(Debug, Clone)]
pub struct EigenLocator {
    /// Directory that may carry a bundled `Eigen/` tree (the project root).
    pub bundled_root: PathBuf,
    /// Priority-ordered absolute candidate paths.
    pub system_paths: Vec<PathBuf>,
    /// Name of the package-metadata query tool.
    pub pkg_config: String,
}

impl EigenLocator {
    pub fn new(bundled_root: impl Into<PathBuf>) -> Self {
        Self {
            bundled_root: bundled_root.into(),
            system_paths: SYSTEM_PATHS.iter().map(PathBuf::from).collect(),
            pkg_config: "pkg-config".to_string(),
        }
    }

    /// Resolve the include directory, or fail with install remediation.
    ///
    /// The returned path is guaranteed non-empty.
    pub fn locate(&self) -> Result<PathBuf, LocateError> {
        if self.bundled_root.join("Eigen").is_dir() {
            return Ok(self.bundled_root.clone());
        }

        for path in &self.system_paths {
            if path.exists() {
                return Ok(path.clone());
            }
        }

        self.query_pkg_config().ok_or(LocateError::EigenNotFound)
    }

    /// Ask the package-metadata tool for the include flag and strip the
    /// `-I` prefix. A missing tool or non-zero exit is simply "no result".
    fn query_pkg_config(&self) -> Option<PathBuf> {
        let output = Command::new(&self.pkg_config)
            .args(["--cflags-only-I", "eigen3"])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let token = stdout.split_whitespace().next()?;
        let include = token.strip_prefix("-I").unwrap_or(token);
        if include.is_empty() {
            None
        } else {
            Some(PathBuf::from(include))
        }
    }
}
