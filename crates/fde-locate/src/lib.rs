//! Include-path resolution for the FDE extension's external dependencies.
//!
//! Two lookups: the Eigen header-only library (ordered fallback strategies,
//! fatal with install remediation when exhausted) and the pybind11 binding
//! generator's own include directory.

pub mod binding;
pub mod eigen;
pub mod error;

pub use binding::BindingLocator;
pub use eigen::EigenLocator;
pub use error::LocateError;
