//! coderr command-line interface.
//!
pub mod doc;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use coderr_core::{Catalog, Registry};

pub use doc::render_markdown;

#[derive(Parser, Debug)]
#[command(
    name = "coderr",
    about = "coderr: validate error-code catalogs and generate their reference",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register every code of a catalog and report problems
    Check {
        /// TOML catalog file
        catalog: PathBuf,
    },

    /// Generate the markdown error-code reference
    Doc {
        /// TOML catalog file
        catalog: PathBuf,

        /// Output file path (writes to file instead of stdout)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the wire status for a code as JSON
    Status {
        /// TOML catalog file
        catalog: PathBuf,

        /// Registered error code
        #[arg(long)]
        code: i32,
    },
}

/// Load `path` and register its codes into a fresh registry.
pub fn load_registry(path: &Path) -> Result<(Catalog, Registry)> {
    let catalog =
        Catalog::load(path).with_context(|| format!("loading catalog {}", path.display()))?;
    let registry = Registry::new();
    catalog
        .install(&registry)
        .with_context(|| format!("registering codes from {}", path.display()))?;
    Ok((catalog, registry))
}

/// Run a command and return what it prints on stdout.
pub fn execute(command: &Command) -> Result<Option<String>> {
    match command {
        Command::Check { catalog } => {
            let (catalog, _) = load_registry(catalog)?;
            Ok(Some(format!("{} error codes ok", catalog.entries().len())))
        }
        Command::Doc { catalog, output } => {
            let (catalog, _) = load_registry(catalog)?;
            let markdown = render_markdown(&catalog);
            match output {
                Some(path) => {
                    std::fs::write(path, &markdown)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "reference written");
                    Ok(None)
                }
                None => Ok(Some(markdown)),
            }
        }
        Command::Status { catalog, code } => {
            let (_, registry) = load_registry(catalog)?;
            if !registry.contains(*code) {
                tracing::warn!(code, "code not in catalog, reporting unknown status");
            }
            let status = registry.code_status(*code);
            Ok(Some(serde_json::to_string_pretty(&status)?))
        }
    }
}
