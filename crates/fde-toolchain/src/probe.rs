//! Empirical compiler capability probing.
//!
//! A probe answers one question: does the active compiler accept a given
//! flag? The answer comes from a trial compilation of a minimal source file
//! rather than a version table, so it reflects the toolchain that is
//! actually installed. The scratch directory is scoped to the probe call
//! and removed on every exit path.

use std::process::Command;

use crate::compiler::{Compiler, CompilerFamily};

/// Outcome of probing a single candidate flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagSupport {
    /// Trial compilation succeeded with the flag.
    Supported,
    /// The compiler rejected the flag.
    Unsupported,
    /// The probe itself could not run (missing driver, I/O failure).
    ProbeError(String),
}

impl FlagSupport {
    pub fn is_supported(&self) -> bool {
        matches!(self, FlagSupport::Supported)
    }
}

/// Capability oracle consulted during flag assembly.
///
/// Object-safe so policy code can be exercised against a stub.
pub trait FlagProbe {
    /// Whether the active compiler accepts `flag`.
    fn flag_supported(&self, flag: &str) -> FlagSupport;
}

const PROBE_SOURCE: &str = "int main(int argc, char **argv) { return 0; }\n";

/// Probe backed by the real compiler driver.
pub struct CompilerProbe<'a> {
    compiler: &'a Compiler,
}

impl<'a> CompilerProbe<'a> {
    pub fn new(compiler: &'a Compiler) -> Self {
        Self { compiler }
    }

    /// Fingerprint the compiler family from its `--version` banner.
    ///
    /// Invocation failure of any kind is absorbed: the family comes out as
    /// `Unknown` and flag policy falls back to GCC-compatible defaults.
    pub fn identify(&self) -> CompilerFamily {
        let output = Command::new(&self.compiler.driver)
            .args(&self.compiler.base_args)
            .arg("--version")
            .output();
        match output {
            Ok(out) if out.status.success() => {
                let mut text = String::from_utf8_lossy(&out.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&out.stderr));
                CompilerFamily::from_version_output(&text)
            }
            _ => CompilerFamily::Unknown,
        }
    }
}

impl FlagProbe for CompilerProbe<'_> {
    fn flag_supported(&self, flag: &str) -> FlagSupport {
        let scratch = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(e) => return FlagSupport::ProbeError(format!("creating scratch dir: {e}")),
        };
        let source = scratch.path().join("probe.cc");
        if let Err(e) = std::fs::write(&source, PROBE_SOURCE) {
            return FlagSupport::ProbeError(format!("writing probe source: {e}"));
        }
        let object = scratch.path().join("probe.o");

        // Candidate flag goes last, after the baseline invocation.
        let output = Command::new(&self.compiler.driver)
            .args(&self.compiler.base_args)
            .arg("-c")
            .arg(&source)
            .arg("-o")
            .arg(&object)
            .arg(flag)
            .output();

        match output {
            Ok(out) if out.status.success() => FlagSupport::Supported,
            Ok(_) => FlagSupport::Unsupported,
            Err(e) => FlagSupport::ProbeError(format!(
                "invoking {}: {e}",
                self.compiler.driver.display()
            )),
        }
    }
}
