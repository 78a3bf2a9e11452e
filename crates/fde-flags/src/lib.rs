//! Flag policy for the FDE extension build.
//!
//! Holds the per-toolchain base flag tables and the architecture-aware
//! native-tuning tables, and combines them with compiler probe results into
//! the final compile/link flag set.

pub mod error;
pub mod flagset;
pub mod policy;

pub use error::PolicyError;
pub use flagset::FlagSet;
pub use policy::{DroppedFlag, FlagPolicy, PolicyOutcome, PolicyRequest, RELAXATION_FLAGS};
