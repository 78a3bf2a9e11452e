//! Ordered compile/link argument sequences.

use serde::{Deserialize, Serialize};

/// The negotiated compiler configuration for one build invocation.
///
/// Two ordered sequences; order reflects application priority (base flags,
/// then relaxation flags, then probed tuning flags, then platform-specific
/// flags). Only unconditional policy or individually probe-verified flags
/// are ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSet {
    pub compile: Vec<String>,
    pub link: Vec<String>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_compile(&mut self, flag: impl Into<String>) {
        self.compile.push(flag.into());
    }

    /// Append a flag to both the compile and link sequences.
    pub fn push_both(&mut self, flag: &str) {
        self.compile.push(flag.to_string());
        self.link.push(flag.to_string());
    }

    pub fn extend_compile<I, S>(&mut self, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compile.extend(flags.into_iter().map(Into::into));
    }
}
