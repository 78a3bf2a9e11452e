//! Dependency resolution errors.

use thiserror::Error;

/// Errors from resolving include paths of external dependencies.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Every Eigen strategy was exhausted. The message carries install
    /// commands per platform rather than a bare "not found".
    #[error(
        "Eigen not found. Please install Eigen:\n  \
         macOS: brew install eigen\n  \
         Ubuntu/Debian: sudo apt-get install libeigen3-dev\n  \
         Fedora/RHEL: sudo dnf install eigen3-devel"
    )]
    EigenNotFound,

    /// The binding generator's include path could not be resolved.
    #[error("failed to resolve the pybind11 include path via '{python}': {message}")]
    BindingInclude { python: String, message: String },
}
