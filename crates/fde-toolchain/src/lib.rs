//! Compiler toolchain and host architecture detection for the FDE extension build.
//!
//! Answers three questions about the environment the extension will be
//! compiled in:
//! - **arch:** what CPU architecture is this host?
//! - **compiler:** what kind of toolchain drives the build, and which
//!   compiler family is behind it?
//! - **probe:** does that compiler actually accept a given flag?

pub mod arch;
pub mod compiler;
pub mod probe;

pub use arch::Arch;
pub use compiler::{Compiler, CompilerFamily, FamilyBucket, ToolchainType};
pub use probe::{CompilerProbe, FlagProbe, FlagSupport};
