//! `fde doctor` — toolchain diagnostics.

use std::path::Path;
use std::process::Command;

use anyhow::Result;

use fde_locate::EigenLocator;
use fde_toolchain::probe::CompilerProbe;
use fde_toolchain::{Arch, Compiler, ToolchainType};

use crate::manifest::{default_compiler, ExtensionManifest};

/// Print toolchain diagnostic information.
pub fn run(project_dir: &Path) -> Result<()> {
    println!("=== FDE Doctor ===");
    println!();

    println!("fde version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Host ---");
    println!("  Machine: {}", std::env::consts::ARCH);
    println!("  Architecture tag: {}", Arch::host());
    println!("  OS family: {}", std::env::consts::OS);
    println!();

    let manifest = ExtensionManifest::find_and_load(project_dir)?;
    let compiler = match &manifest {
        Some((m, _)) => m.compiler(),
        None => default_compiler(),
    };

    println!("--- Toolchain ---");
    print_compiler_status(&compiler);
    println!("  Toolchain type: {}", ToolchainType::of(&compiler));
    let probe = CompilerProbe::new(&compiler);
    println!("  Compiler family: {}", probe.identify());
    println!();

    println!("--- Dependencies ---");
    let root = match &manifest {
        Some((_, dir)) => dir.clone(),
        None => project_dir.to_path_buf(),
    };
    match EigenLocator::new(&root).locate() {
        Ok(path) => println!("  Eigen: {}", path.display()),
        Err(_) => println!("  Eigen: not found (all strategies exhausted)"),
    }
    print_tool_status("pkg-config", &["--version"]);
    println!();

    println!("--- Project Status ---");
    match &manifest {
        Some((m, dir)) => {
            println!("  extension.toml: found at {}", dir.display());
            println!("  Package: {}", m.package.name);
            println!("  Modules: {}", m.modules.len());
        }
        None => {
            println!("  extension.toml: not found");
        }
    }

    Ok(())
}

fn print_compiler_status(compiler: &Compiler) {
    match Command::new(&compiler.driver).arg("--version").output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {}: {first_line}", compiler.driver.display());
        }
        Err(_) => {
            println!("  {}: not found", compiler.driver.display());
        }
    }
}

fn print_tool_status(name: &str, args: &[&str]) {
    match Command::new(name).args(args).output() {
        Ok(output) => {
            let version = String::from_utf8_lossy(&output.stdout);
            let first_line = version.lines().next().unwrap_or("(unknown version)");
            println!("  {name}: {first_line}");
        }
        Err(_) => {
            println!("  {name}: not found");
        }
    }
}
