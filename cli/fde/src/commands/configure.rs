//! `fde configure` — negotiate flags and apply them to the declared modules.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use fde_extension::{configure, BuildOptions};

use crate::manifest::ExtensionManifest;

/// Run the configuration pipeline and print the resulting report.
pub fn run(project_dir: &Path, manifest_path: Option<&str>, emit: Option<&str>) -> Result<()> {
    let (manifest, root) = load(project_dir, manifest_path)?;

    let mut targets = manifest.targets();
    if targets.is_empty() {
        bail!("no [[module]] declared in extension.toml");
    }

    let mut options = BuildOptions::host(manifest.compiler(), &root);
    options.binding = manifest.binding_locator();

    let report = configure(&mut targets, &options)?;

    match emit {
        Some("json") => println!("{}", serde_json::to_string_pretty(&report)?),
        Some("human") | None => print!("{report}"),
        Some(other) => bail!("unknown emit mode '{other}' (expected human or json)"),
    }

    Ok(())
}

fn load(
    project_dir: &Path,
    manifest_path: Option<&str>,
) -> Result<(ExtensionManifest, PathBuf)> {
    match manifest_path {
        Some(path) => {
            let path = Path::new(path);
            let manifest = ExtensionManifest::load(path)?;
            let root = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| project_dir.to_path_buf());
            Ok((manifest, root))
        }
        None => match ExtensionManifest::find_and_load(project_dir)? {
            Some((manifest, root)) => Ok((manifest, root)),
            None => bail!("no extension.toml found (searched upward from {})", project_dir.display()),
        },
    }
}
