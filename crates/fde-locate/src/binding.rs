//! Binding-generator include resolution.

use std::path::PathBuf;
use std::process::Command;

use crate::error::LocateError;

/// Resolves the include directory of the pybind11 binding generator.
///
/// An explicit `include` path short-circuits the lookup; otherwise the
/// configured python interpreter is asked for `pybind11.get_include()`.
#[derive(Debug, Clone)]
pub struct BindingLocator {
    /// Python interpreter to query.
    pub python: String,
    /// Explicit include path, bypassing the interpreter query.
    pub include: Option<PathBuf>,
}

impl Default for BindingLocator {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            include: None,
        }
    }
}

impl BindingLocator {
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            include: None,
        }
    }

    pub fn resolve(&self) -> Result<PathBuf, LocateError> {
        if let Some(include) = &self.include {
            return Ok(include.clone());
        }

        let output = Command::new(&self.python)
            .args(["-c", "import pybind11; print(pybind11.get_include())"])
            .output()
            .map_err(|e| LocateError::BindingInclude {
                python: self.python.clone(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(LocateError::BindingInclude {
                python: self.python.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout.trim();
        if path.is_empty() {
            return Err(LocateError::BindingInclude {
                python: self.python.clone(),
                message: "interpreter returned an empty path".to_string(),
            });
        }
        Ok(PathBuf::from(path))
    }
}
