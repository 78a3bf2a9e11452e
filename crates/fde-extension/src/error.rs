//! Extension configuration errors.

use thiserror::Error;

/// Errors that can abort configuring the extension targets.
///
/// Probe-level failures never surface here; they degrade into a smaller
/// flag set. Only unresolvable dependencies, unrecognized toolchains, and
/// backend failures terminate the build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("flag policy: {0}")]
    Policy(#[from] fde_flags::PolicyError),

    #[error("dependency resolution: {0}")]
    Locate(#[from] fde_locate::LocateError),

    #[error("compile step failed for '{target}': {message}")]
    Backend { target: String, message: String },
}
