//! Compiler driver model, toolchain classification, and family fingerprinting.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The active compiler as configured by the invoking build front end.
///
/// The pipeline never discovers compilers on its own; it works with whatever
/// driver and baseline arguments the front end hands it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compiler {
    /// Path to the compiler executable (e.g. `c++`, `/usr/bin/clang++`, `cl`).
    pub driver: PathBuf,
    /// Arguments always passed before any per-invocation flags.
    #[serde(default)]
    pub base_args: Vec<String>,
}

impl Compiler {
    pub fn new(driver: impl Into<PathBuf>) -> Self {
        Self {
            driver: driver.into(),
            base_args: Vec::new(),
        }
    }
}

/// Invocation convention of the active toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolchainType {
    Unix,
    Msvc,
}

impl ToolchainType {
    /// Classify from the compiler driver. `cl` and `clang-cl` follow the
    /// MSVC convention; everything else is driven unix-style.
    pub fn of(compiler: &Compiler) -> Self {
        let stem = compiler
            .driver
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_lowercase();
        if stem == "cl" || stem == "clang-cl" {
            ToolchainType::Msvc
        } else {
            ToolchainType::Unix
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToolchainType::Unix => "unix",
            ToolchainType::Msvc => "msvc",
        }
    }
}

impl fmt::Display for ToolchainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler family fingerprinted from the version banner.
///
/// Classification is a best-effort substring heuristic; toolchains whose
/// banner matches no vendor string come out as `Unknown` and are treated as
/// GCC-compatible by flag policy. Callers with such a toolchain can bypass
/// fingerprinting entirely via the family override on the build options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompilerFamily {
    Gcc,
    Clang,
    AppleClang,
    Unknown,
}

impl CompilerFamily {
    /// Classify combined stdout/stderr of a `--version` invocation.
    pub fn from_version_output(output: &str) -> Self {
        let text = output.to_lowercase();
        if text.contains("clang") && !text.contains("gcc") {
            if text.contains("apple clang") {
                CompilerFamily::AppleClang
            } else {
                CompilerFamily::Clang
            }
        } else if text.contains("gcc") {
            CompilerFamily::Gcc
        } else {
            CompilerFamily::Unknown
        }
    }

    /// Collapse to the bucket used by the flag policy tables.
    pub fn bucket(self) -> FamilyBucket {
        match self {
            CompilerFamily::Clang | CompilerFamily::AppleClang => FamilyBucket::ClangCompatible,
            CompilerFamily::Gcc | CompilerFamily::Unknown => FamilyBucket::GccCompatible,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::AppleClang => "apple-clang",
            CompilerFamily::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy-level grouping of compiler families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FamilyBucket {
    GccCompatible,
    ClangCompatible,
}

impl FamilyBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            FamilyBucket::GccCompatible => "gcc-compatible",
            FamilyBucket::ClangCompatible => "clang-compatible",
        }
    }
}

impl fmt::Display for FamilyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
