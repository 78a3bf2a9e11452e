//! Extension target configuration pipeline for the FDE native module.
//!
//! Sequences detection (toolchain type, architecture, compiler family),
//! flag negotiation, and dependency resolution, then applies the result to
//! every declared extension target before hand-off to the compile/link
//! step.

pub mod error;
pub mod orchestrate;
pub mod report;
pub mod target;

pub use error::BuildError;
pub use orchestrate::{
    configure, configure_and_build, configure_with, BuildOptions, CompileBackend,
};
pub use report::ConfigureReport;
pub use target::ExtensionTarget;
