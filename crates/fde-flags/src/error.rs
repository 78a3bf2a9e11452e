//! Flag policy errors.

use fde_toolchain::{FamilyBucket, ToolchainType};
use thiserror::Error;

/// Errors from flag policy lookups.
///
/// Both are fatal: a toolchain type or family bucket missing from the policy
/// tables has no safe default flag set to fall back on.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("no flag table for toolchain type '{toolchain}'")]
    UnknownToolchain { toolchain: ToolchainType },

    #[error("no native-tuning table for compiler family bucket '{bucket}'")]
    UnknownFamilyBucket { bucket: FamilyBucket },
}
