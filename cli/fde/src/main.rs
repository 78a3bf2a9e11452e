//! FDE build front end — configures compilation of the native extension.

mod commands;
mod manifest;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fde", version, about = "Build configuration for the FDE native extension")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Negotiate compiler flags and apply them to the declared modules
    Configure {
        /// Path to extension.toml (default: search upward from the cwd)
        #[arg(long)]
        manifest: Option<String>,
        /// Report format (human, json)
        #[arg(long)]
        emit: Option<String>,
    },
    /// Check toolchain and project status
    Doctor,
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Configure { manifest, emit } => {
            commands::configure::run(&cwd, manifest.as_deref(), emit.as_deref())
        }
        Commands::Doctor => commands::doctor::run(&cwd),
    }
}
