//! Configuration report for one build invocation.

use std::fmt;
use std::path::PathBuf;

use fde_flags::{DroppedFlag, FlagSet};
use fde_toolchain::{Arch, CompilerFamily, ToolchainType};
use serde::{Deserialize, Serialize};

/// Summary of the negotiated configuration applied to every target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigureReport {
    pub toolchain: ToolchainType,
    pub arch: Arch,
    pub family: CompilerFamily,
    pub flags: FlagSet,
    pub eigen_include: PathBuf,
    pub binding_include: PathBuf,
    /// Candidate flags excluded by probing.
    pub dropped: Vec<DroppedFlag>,
    /// Names of the configured targets.
    pub targets: Vec<String>,
}

impl fmt::Display for ConfigureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Extension Configuration ===")?;
        writeln!(f, "Toolchain: {}", self.toolchain)?;
        writeln!(f, "Architecture: {}", self.arch)?;
        writeln!(f, "Compiler family: {}", self.family)?;
        writeln!(f)?;

        writeln!(f, "--- Compile arguments ---")?;
        for flag in &self.flags.compile {
            writeln!(f, "  {flag}")?;
        }

        writeln!(f)?;
        writeln!(f, "--- Link arguments ---")?;
        for flag in &self.flags.link {
            writeln!(f, "  {flag}")?;
        }

        writeln!(f)?;
        writeln!(f, "--- Include directories ---")?;
        writeln!(f, "  Eigen:    {}", self.eigen_include.display())?;
        writeln!(f, "  pybind11: {}", self.binding_include.display())?;

        if !self.dropped.is_empty() {
            writeln!(f)?;
            writeln!(f, "--- Dropped flags ---")?;
            for dropped in &self.dropped {
                writeln!(f, "  {} ({})", dropped.flag, dropped.reason)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Configured targets: {}", self.targets.join(", "))?;

        Ok(())
    }
}
