//! Build orchestration: detect, negotiate, resolve, and apply.

use std::path::PathBuf;

use fde_flags::{FlagPolicy, PolicyRequest};
use fde_locate::{BindingLocator, EigenLocator};
use fde_toolchain::probe::{CompilerProbe, FlagProbe};
use fde_toolchain::{Arch, Compiler, CompilerFamily, ToolchainType};

use crate::error::BuildError;
use crate::report::ConfigureReport;
use crate::target::ExtensionTarget;

/// External compile/link step consuming a fully configured target.
///
/// Object-safe so orchestration can hand finished targets to any build
/// front end (or a recording stub in tests). Execution itself is outside
/// this crate.
pub trait CompileBackend {
    fn compile(&self, target: &ExtensionTarget) -> Result<(), BuildError>;
}

/// Inputs for one configuration run.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Active compiler as configured by the invoking front end.
    pub compiler: Compiler,
    /// Host-reported machine identifier.
    pub machine: String,
    /// Host-reported OS family (e.g. "macos", "linux").
    pub os_family: String,
    /// Skip version fingerprinting and force a compiler family.
    pub family_override: Option<CompilerFamily>,
    /// Eigen resolution strategies.
    pub eigen: EigenLocator,
    /// Binding-generator include resolution.
    pub binding: BindingLocator,
}

impl BuildOptions {
    /// Options for the host platform with default locators rooted at `root`.
    pub fn host(compiler: Compiler, root: impl Into<PathBuf>) -> Self {
        Self {
            compiler,
            machine: std::env::consts::ARCH.to_string(),
            os_family: std::env::consts::OS.to_string(),
            family_override: None,
            eigen: EigenLocator::new(root),
            binding: BindingLocator::default(),
        }
    }
}

/// Configure every target with the negotiated flags and include paths.
///
/// Fingerprints the compiler family with the real driver (unix-like only;
/// MSVC builds are never probed), honoring the family override if set.
pub fn configure(
    targets: &mut [ExtensionTarget],
    options: &BuildOptions,
) -> Result<ConfigureReport, BuildError> {
    let probe = CompilerProbe::new(&options.compiler);
    let family = match (ToolchainType::of(&options.compiler), options.family_override) {
        (_, Some(family)) => family,
        (ToolchainType::Unix, None) => probe.identify(),
        (ToolchainType::Msvc, None) => CompilerFamily::Unknown,
    };
    configure_with(targets, options, family, &probe)
}

/// Configuration with an explicit family and capability oracle, for callers
/// that manage their own probe.
pub fn configure_with(
    targets: &mut [ExtensionTarget],
    options: &BuildOptions,
    family: CompilerFamily,
    probe: &dyn FlagProbe,
) -> Result<ConfigureReport, BuildError> {
    let toolchain = ToolchainType::of(&options.compiler);
    let arch = Arch::from_machine(&options.machine);

    let policy = FlagPolicy::default();
    let request = PolicyRequest {
        toolchain,
        arch: arch.clone(),
        family,
        os_family: options.os_family.clone(),
    };
    let outcome = policy.assemble(&request, probe)?;

    let eigen_include = options.eigen.locate()?;
    let binding_include = options.binding.resolve()?;
    let includes = [eigen_include.clone(), binding_include.clone()];

    for target in targets.iter_mut() {
        target.apply(&outcome.flags, &includes);
    }

    Ok(ConfigureReport {
        toolchain,
        arch,
        family,
        flags: outcome.flags,
        eigen_include,
        binding_include,
        dropped: outcome.dropped,
        targets: targets.iter().map(|t| t.name.clone()).collect(),
    })
}

/// Configure every target, then hand each one to the compile backend.
pub fn configure_and_build(
    targets: &mut [ExtensionTarget],
    options: &BuildOptions,
    backend: &dyn CompileBackend,
) -> Result<ConfigureReport, BuildError> {
    let report = configure(targets, options)?;
    for target in targets.iter() {
        backend.compile(target)?;
    }
    Ok(report)
}
