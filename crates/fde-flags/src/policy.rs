//! Toolchain-keyed flag tables and probe-filtered assembly.

use std::collections::HashMap;

use fde_toolchain::probe::{FlagProbe, FlagSupport};
use fde_toolchain::{Arch, CompilerFamily, FamilyBucket, ToolchainType};
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::flagset::FlagSet;

/// Floating-point relaxation flags appended to every unix-like build.
///
/// Unlike the native-tuning candidates these are not probed: the
/// precision/performance trade-off is applied globally, regardless of
/// architecture or compiler family.
pub const RELAXATION_FLAGS: &[&str] = &[
    "-fassociative-math",
    "-fno-signaling-nans",
    "-fno-trapping-math",
    "-fno-signed-zeros",
    "-freciprocal-math",
    "-fno-math-errno",
];

/// Probed alongside the native-tuning candidates on unix-like builds.
const VISIBILITY_FLAG: &str = "-fvisibility=hidden";

/// Minimum deployment target pinned for both compile and link on macOS.
const MACOS_VERSION_MIN: &str = "-mmacosx-version-min=11.0";

/// Standard-library selection probed on clang-family macOS builds.
const MACOS_STDLIB: &str = "-stdlib=libc++";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A candidate flag that probing excluded from the final set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedFlag {
    pub flag: String,
    pub reason: String,
}

/// Inputs to flag assembly for one build invocation.
#[derive(Debug, Clone)]
pub struct PolicyRequest {
    pub toolchain: ToolchainType,
    pub arch: Arch,
    pub family: CompilerFamily,
    /// Host OS family as reported by the platform (e.g. "macos", "linux").
    pub os_family: String,
}

/// Result of assembling the flag set for one invocation.
#[derive(Debug, Clone)]
pub struct PolicyOutcome {
    pub flags: FlagSet,
    /// Candidates excluded by probing, with the reason each was dropped.
    /// A failed probe run is recorded distinctly from a rejected flag.
    pub dropped: Vec<DroppedFlag>,
}

/// Immutable per-toolchain flag tables.
///
/// Lookups hand out fresh copies, so later mutation cannot alias across
/// targets or invocations.
#[derive(Debug, Clone)]
pub struct FlagPolicy {
    base: HashMap<ToolchainType, FlagSet>,
    native: HashMap<FamilyBucket, HashMap<Arch, Vec<String>>>,
    /// Machine-tuning fallback for architectures without a table entry.
    native_default: Vec<String>,
}

impl Default for FlagPolicy {
    fn default() -> Self {
        let mut base = HashMap::new();
        base.insert(
            ToolchainType::Unix,
            FlagSet {
                compile: strings(&[
                    "-std=c++17",
                    "-O3",
                    "-fPIC",
                    "-flax-vector-conversions",
                    "-DNDEBUG",
                    "-Wno-unknown-pragmas",
                    "-Wno-unknown-warning-option",
                    "-Wno-unused-function",
                    "-Wl,--no-undefined",
                ]),
                link: strings(&["-pthread"]),
            },
        );
        base.insert(
            ToolchainType::Msvc,
            FlagSet {
                compile: strings(&["/std:c++17", "/O2", "/EHsc", "/DNDEBUG", "/wd4244"]),
                link: Vec::new(),
            },
        );

        let machine_pair = strings(&["-march=native", "-mtune=native"]);
        let cpu_single = strings(&["-mcpu=native"]);
        let per_arch: HashMap<Arch, Vec<String>> = HashMap::from([
            (Arch::X86_64, machine_pair.clone()),
            (Arch::Arm64, cpu_single),
        ]);
        let mut native = HashMap::new();
        native.insert(FamilyBucket::GccCompatible, per_arch.clone());
        native.insert(FamilyBucket::ClangCompatible, per_arch);

        Self {
            base,
            native,
            native_default: machine_pair,
        }
    }
}

impl FlagPolicy {
    /// Base flag set for a toolchain type, as a fresh copy.
    pub fn base(&self, toolchain: ToolchainType) -> Result<FlagSet, PolicyError> {
        self.base
            .get(&toolchain)
            .cloned()
            .ok_or(PolicyError::UnknownToolchain { toolchain })
    }

    /// Native-tuning candidates for (family bucket, architecture).
    ///
    /// Architectures without a table entry fall back to the default
    /// machine-tuning pair regardless of bucket. A bucket without a table
    /// is fatal.
    pub fn native_tuning(
        &self,
        bucket: FamilyBucket,
        arch: &Arch,
    ) -> Result<Vec<String>, PolicyError> {
        let by_arch = self
            .native
            .get(&bucket)
            .ok_or(PolicyError::UnknownFamilyBucket { bucket })?;
        Ok(by_arch.get(arch).unwrap_or(&self.native_default).clone())
    }

    /// Assemble the full flag set for one build invocation.
    ///
    /// Unix-like builds get the base table, then the unconditional
    /// relaxation flags, then the probe-verified native-tuning and
    /// visibility candidates, then platform-specific adjustments. MSVC
    /// builds never probe; the base table is applied verbatim.
    pub fn assemble(
        &self,
        request: &PolicyRequest,
        probe: &dyn FlagProbe,
    ) -> Result<PolicyOutcome, PolicyError> {
        let mut flags = self.base(request.toolchain)?;
        let mut dropped = Vec::new();

        if request.toolchain == ToolchainType::Unix {
            flags.extend_compile(RELAXATION_FLAGS.iter().copied());

            let mut candidates = self.native_tuning(request.family.bucket(), &request.arch)?;
            candidates.push(VISIBILITY_FLAG.to_string());
            for flag in candidates {
                match probe.flag_supported(&flag) {
                    FlagSupport::Supported => flags.push_compile(flag),
                    FlagSupport::Unsupported => dropped.push(DroppedFlag {
                        flag,
                        reason: "not accepted by the compiler".to_string(),
                    }),
                    FlagSupport::ProbeError(message) => dropped.push(DroppedFlag {
                        flag,
                        reason: format!("probe failed: {message}"),
                    }),
                }
            }

            if request.os_family == "macos" {
                flags.push_both(MACOS_VERSION_MIN);
                if request.family.bucket() == FamilyBucket::ClangCompatible {
                    match probe.flag_supported(MACOS_STDLIB) {
                        FlagSupport::Supported => flags.push_both(MACOS_STDLIB),
                        FlagSupport::Unsupported => dropped.push(DroppedFlag {
                            flag: MACOS_STDLIB.to_string(),
                            reason: "not accepted by the compiler".to_string(),
                        }),
                        FlagSupport::ProbeError(message) => dropped.push(DroppedFlag {
                            flag: MACOS_STDLIB.to_string(),
                            reason: format!("probe failed: {message}"),
                        }),
                    }
                }
            }
        }

        Ok(PolicyOutcome { flags, dropped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts every candidate.
    struct YesProbe;

    impl FlagProbe for YesProbe {
        fn flag_supported(&self, _flag: &str) -> FlagSupport {
            FlagSupport::Supported
        }
    }

    /// Rejects the listed candidates, accepts the rest.
    struct DenyProbe<'a>(&'a [&'a str]);

    impl FlagProbe for DenyProbe<'_> {
        fn flag_supported(&self, flag: &str) -> FlagSupport {
            if self.0.contains(&flag) {
                FlagSupport::Unsupported
            } else {
                FlagSupport::Supported
            }
        }
    }

    /// Fails to run at all.
    struct BrokenProbe;

    impl FlagProbe for BrokenProbe {
        fn flag_supported(&self, _flag: &str) -> FlagSupport {
            FlagSupport::ProbeError("compiler driver missing".to_string())
        }
    }

    /// Proves that a code path performs no probing.
    struct PanicProbe;

    impl FlagProbe for PanicProbe {
        fn flag_supported(&self, flag: &str) -> FlagSupport {
            panic!("unexpected probe of '{flag}'");
        }
    }

    fn unix_request(arch: Arch, family: CompilerFamily, os: &str) -> PolicyRequest {
        PolicyRequest {
            toolchain: ToolchainType::Unix,
            arch,
            family,
            os_family: os.to_string(),
        }
    }

    #[test]
    fn unix_base_table() {
        let policy = FlagPolicy::default();
        let base = policy.base(ToolchainType::Unix).unwrap();
        assert_eq!(base.compile[0], "-std=c++17");
        assert!(base.compile.contains(&"-O3".to_string()));
        assert!(base.compile.contains(&"-fPIC".to_string()));
        assert!(base.compile.contains(&"-DNDEBUG".to_string()));
        assert!(base.compile.contains(&"-Wl,--no-undefined".to_string()));
        assert_eq!(base.link, vec!["-pthread"]);
    }

    #[test]
    fn msvc_base_table_is_exact() {
        let policy = FlagPolicy::default();
        let base = policy.base(ToolchainType::Msvc).unwrap();
        assert_eq!(
            base.compile,
            vec!["/std:c++17", "/O2", "/EHsc", "/DNDEBUG", "/wd4244"]
        );
        assert!(base.link.is_empty());
    }

    #[test]
    fn base_hands_out_fresh_copies() {
        let policy = FlagPolicy::default();
        let mut first = policy.base(ToolchainType::Unix).unwrap();
        first.push_compile("-made-up");
        let second = policy.base(ToolchainType::Unix).unwrap();
        assert!(!second.compile.contains(&"-made-up".to_string()));
    }

    #[test]
    fn missing_toolchain_table_is_fatal() {
        let policy = FlagPolicy {
            base: HashMap::new(),
            native: HashMap::new(),
            native_default: Vec::new(),
        };
        assert!(matches!(
            policy.base(ToolchainType::Unix),
            Err(PolicyError::UnknownToolchain { .. })
        ));
    }

    #[test]
    fn native_tuning_x86_64_is_machine_pair() {
        let policy = FlagPolicy::default();
        let flags = policy
            .native_tuning(FamilyBucket::GccCompatible, &Arch::X86_64)
            .unwrap();
        assert_eq!(flags, vec!["-march=native", "-mtune=native"]);
    }

    #[test]
    fn native_tuning_arm64_is_cpu_flag() {
        let policy = FlagPolicy::default();
        let flags = policy
            .native_tuning(FamilyBucket::GccCompatible, &Arch::Arm64)
            .unwrap();
        assert_eq!(flags, vec!["-mcpu=native"]);
        let flags = policy
            .native_tuning(FamilyBucket::ClangCompatible, &Arch::Arm64)
            .unwrap();
        assert_eq!(flags, vec!["-mcpu=native"]);
    }

    #[test]
    fn native_tuning_unmapped_arch_falls_back_to_machine_pair() {
        let policy = FlagPolicy::default();
        for bucket in [FamilyBucket::GccCompatible, FamilyBucket::ClangCompatible] {
            let flags = policy
                .native_tuning(bucket, &Arch::Other("riscv64".to_string()))
                .unwrap();
            assert_eq!(flags, vec!["-march=native", "-mtune=native"]);
        }
    }

    #[test]
    fn native_tuning_missing_bucket_is_fatal() {
        let policy = FlagPolicy {
            base: HashMap::new(),
            native: HashMap::new(),
            native_default: Vec::new(),
        };
        assert!(matches!(
            policy.native_tuning(FamilyBucket::GccCompatible, &Arch::X86_64),
            Err(PolicyError::UnknownFamilyBucket { .. })
        ));
    }

    #[test]
    fn unix_x86_64_clang_full_assembly() {
        let policy = FlagPolicy::default();
        let request = unix_request(Arch::X86_64, CompilerFamily::Clang, "linux");
        let outcome = policy.assemble(&request, &YesProbe).unwrap();

        let compile = &outcome.flags.compile;
        assert!(compile.contains(&"-std=c++17".to_string()));
        assert!(compile.contains(&"-O3".to_string()));
        assert!(compile.contains(&"-fPIC".to_string()));
        assert!(compile.contains(&"-march=native".to_string()));
        assert!(compile.contains(&"-mtune=native".to_string()));
        assert!(compile.contains(&"-fvisibility=hidden".to_string()));
        for flag in RELAXATION_FLAGS {
            assert!(compile.contains(&flag.to_string()), "missing {flag}");
        }
        assert!(!compile.contains(&"-mcpu=native".to_string()));
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn assembly_order_is_base_then_relaxation_then_tuning() {
        let policy = FlagPolicy::default();
        let request = unix_request(Arch::X86_64, CompilerFamily::Gcc, "linux");
        let outcome = policy.assemble(&request, &YesProbe).unwrap();

        let pos = |flag: &str| {
            outcome
                .flags
                .compile
                .iter()
                .position(|f| f == flag)
                .unwrap()
        };
        assert!(pos("-O3") < pos("-fassociative-math"));
        assert!(pos("-fassociative-math") < pos("-march=native"));
        assert!(pos("-march=native") < pos("-fvisibility=hidden"));
    }

    #[test]
    fn msvc_assembly_never_probes_and_is_verbatim() {
        let policy = FlagPolicy::default();
        let request = PolicyRequest {
            toolchain: ToolchainType::Msvc,
            arch: Arch::X86_64,
            family: CompilerFamily::Unknown,
            os_family: "windows".to_string(),
        };
        let outcome = policy.assemble(&request, &PanicProbe).unwrap();
        assert_eq!(outcome.flags, policy.base(ToolchainType::Msvc).unwrap());
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn rejected_candidates_are_dropped_silently() {
        let policy = FlagPolicy::default();
        let request = unix_request(Arch::X86_64, CompilerFamily::Gcc, "linux");
        let outcome = policy
            .assemble(&request, &DenyProbe(&["-march=native", "-fvisibility=hidden"]))
            .unwrap();

        let compile = &outcome.flags.compile;
        assert!(!compile.contains(&"-march=native".to_string()));
        assert!(compile.contains(&"-mtune=native".to_string()));
        assert!(!compile.contains(&"-fvisibility=hidden".to_string()));
        assert_eq!(outcome.dropped.len(), 2);
        assert!(outcome
            .dropped
            .iter()
            .all(|d| d.reason == "not accepted by the compiler"));
    }

    #[test]
    fn probe_errors_degrade_without_failing_the_build() {
        let policy = FlagPolicy::default();
        let request = unix_request(Arch::Arm64, CompilerFamily::Clang, "linux");
        let outcome = policy.assemble(&request, &BrokenProbe).unwrap();

        // All probed candidates gone, unconditional flags intact.
        assert!(!outcome.flags.compile.contains(&"-mcpu=native".to_string()));
        assert!(outcome
            .flags
            .compile
            .contains(&"-fassociative-math".to_string()));
        assert_eq!(outcome.dropped.len(), 2);
        assert!(outcome
            .dropped
            .iter()
            .all(|d| d.reason.contains("compiler driver missing")));
    }

    #[test]
    fn macos_pins_deployment_target_for_compile_and_link() {
        let policy = FlagPolicy::default();
        let request = unix_request(Arch::Arm64, CompilerFamily::Gcc, "macos");
        let outcome = policy.assemble(&request, &YesProbe).unwrap();

        let pin = "-mmacosx-version-min=11.0".to_string();
        assert!(outcome.flags.compile.contains(&pin));
        assert!(outcome.flags.link.contains(&pin));
        // Not clang-family: no stdlib selection even though it would probe fine.
        assert!(!outcome.flags.compile.contains(&"-stdlib=libc++".to_string()));
        assert!(!outcome.flags.link.contains(&"-stdlib=libc++".to_string()));
    }

    #[test]
    fn macos_clang_selects_stdlib_when_probe_succeeds() {
        let policy = FlagPolicy::default();
        let request = unix_request(Arch::Arm64, CompilerFamily::AppleClang, "macos");
        let outcome = policy.assemble(&request, &YesProbe).unwrap();

        let stdlib = "-stdlib=libc++".to_string();
        assert!(outcome.flags.compile.contains(&stdlib));
        assert!(outcome.flags.link.contains(&stdlib));
    }

    #[test]
    fn macos_clang_drops_stdlib_when_probe_rejects() {
        let policy = FlagPolicy::default();
        let request = unix_request(Arch::Arm64, CompilerFamily::Clang, "macos");
        let outcome = policy
            .assemble(&request, &DenyProbe(&["-stdlib=libc++"]))
            .unwrap();

        assert!(!outcome.flags.compile.contains(&"-stdlib=libc++".to_string()));
        assert!(outcome.dropped.iter().any(|d| d.flag == "-stdlib=libc++"));
        // Deployment target pin is unconditional.
        assert!(outcome
            .flags
            .link
            .contains(&"-mmacosx-version-min=11.0".to_string()));
    }

    #[test]
    fn relaxation_flags_are_never_probed() {
        let policy = FlagPolicy::default();
        let request = unix_request(Arch::X86_64, CompilerFamily::Gcc, "linux");
        // Rejecting every probed candidate still leaves all six relaxation
        // flags in place.
        let outcome = policy
            .assemble(
                &request,
                &DenyProbe(&["-march=native", "-mtune=native", "-fvisibility=hidden"]),
            )
            .unwrap();
        for flag in RELAXATION_FLAGS {
            assert!(outcome.flags.compile.contains(&flag.to_string()));
        }
    }
}
