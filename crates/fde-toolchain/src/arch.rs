//! Host CPU architecture normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical architecture tag derived from the host machine identifier.
///
/// Always derived from what the platform reports, never user-supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arch {
    X86,
    X86_64,
    Arm,
    Arm64,
    /// Unrecognized machine identifier, passed through lower-cased.
    Other(String),
}

impl Arch {
    /// Normalize a raw machine identifier. Total function; never fails.
    pub fn from_machine(raw: &str) -> Self {
        let machine = raw.to_lowercase();
        match machine.as_str() {
            "x86_64" | "amd64" => Arch::X86_64,
            "i386" | "i686" => Arch::X86,
            "arm64" | "aarch64" => Arch::Arm64,
            m if m.contains("arm") => Arch::Arm,
            _ => Arch::Other(machine),
        }
    }

    /// The architecture of the machine this build runs on.
    pub fn host() -> Self {
        Self::from_machine(std::env::consts::ARCH)
    }

    /// Canonical tag string (e.g. "x86-64").
    pub fn as_str(&self) -> &str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86-64",
            Arch::Arm => "arm",
            Arch::Arm64 => "arm64",
            Arch::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
