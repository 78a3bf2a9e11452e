//! `extension.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fde_extension::ExtensionTarget;
use fde_locate::BindingLocator;
use fde_toolchain::Compiler;

/// The top-level manifest for an FDE extension project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionManifest {
    /// Package metadata (required).
    pub package: PackageConfig,
    /// Toolchain configuration.
    #[serde(default)]
    pub toolchain: Option<ToolchainConfig>,
    /// Binding-generator configuration.
    #[serde(default)]
    pub binding: Option<BindingConfig>,
    /// Declared extension modules.
    #[serde(default, rename = "module")]
    pub modules: Vec<ModuleConfig>,
}

/// Package metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    /// Package name (required).
    pub name: String,
    /// Package version.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Toolchain configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Compiler driver (default: `CXX` from the environment, then `c++`).
    #[serde(default)]
    pub compiler: Option<String>,
    /// Arguments always passed to the driver.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Binding-generator configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Python interpreter queried for the pybind11 include path.
    #[serde(default)]
    pub python: Option<String>,
    /// Explicit pybind11 include path, bypassing the interpreter.
    #[serde(default)]
    pub include: Option<PathBuf>,
}

/// One declared extension module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleConfig {
    /// Module name.
    pub name: String,
    /// C++ source files.
    pub sources: Vec<PathBuf>,
    /// Extra include directories.
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,
}

/// The compiler configured by the front end when the manifest does not name
/// one: `CXX` from the environment, then `c++`.
pub fn default_compiler() -> Compiler {
    let driver = std::env::var("CXX").unwrap_or_else(|_| "c++".to_string());
    Compiler::new(driver)
}

impl ExtensionManifest {
    /// Search upward from `start_dir` for an `extension.toml` file, parse
    /// and return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("extension.toml");
            if candidate.is_file() {
                let manifest = Self::load(&candidate)?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Load and parse a manifest from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a manifest from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Declared modules as extension targets ready for configuration.
    pub fn targets(&self) -> Vec<ExtensionTarget> {
        self.modules
            .iter()
            .map(|m| ExtensionTarget {
                name: m.name.clone(),
                sources: m.sources.clone(),
                include_dirs: m.include_dirs.clone(),
                compile_args: Vec::new(),
                link_args: Vec::new(),
            })
            .collect()
    }

    /// The active compiler: manifest `[toolchain]`, then `CXX`, then `c++`.
    pub fn compiler(&self) -> Compiler {
        let mut compiler = match self.toolchain.as_ref().and_then(|t| t.compiler.clone()) {
            Some(driver) => Compiler::new(driver),
            None => default_compiler(),
        };
        if let Some(toolchain) = &self.toolchain {
            compiler.base_args = toolchain.args.clone();
        }
        compiler
    }

    /// Binding-generator locator from the `[binding]` section.
    pub fn binding_locator(&self) -> BindingLocator {
        let mut locator = match self.binding.as_ref().and_then(|b| b.python.clone()) {
            Some(python) => BindingLocator::new(python),
            None => BindingLocator::default(),
        };
        locator.include = self.binding.as_ref().and_then(|b| b.include.clone());
        locator
    }
}
