use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::VersionList;
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all versions in the catalog
    List {
        /// Path to the signature catalog
        #[arg(long, required = true)]
        catalog: PathBuf,
    },

    /// Show the signatures of a specific version
    Show {
        /// Version label
        #[arg(required = true)]
        version: String,

        /// Path to the signature catalog
        #[arg(long, required = true)]
        catalog: PathBuf,
    },

    /// List the paths requested from a target during identification
    Paths {
        /// Path to the signature catalog
        #[arg(long, required = true)]
        catalog: PathBuf,
    },

    /// Export the validated catalog to a file
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to the signature catalog
        #[arg(long, required = true)]
        catalog: PathBuf,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the version is not found,
/// or output cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { catalog } => {
            let catalog = VersionList::load_from_file(&catalog)?;
            list_versions(&catalog, format, verbose)
        }
        CatalogCommands::Show { version, catalog } => {
            let catalog = VersionList::load_from_file(&catalog)?;
            show_version(&catalog, &version, format)
        }
        CatalogCommands::Paths { catalog } => {
            let catalog = VersionList::load_from_file(&catalog)?;
            list_paths(&catalog, format)
        }
        CatalogCommands::Export { output, catalog } => {
            let catalog = VersionList::load_from_file(&catalog)?;
            std::fs::write(&output, catalog.to_json()?)?;
            eprintln!(
                "Exported {} versions to {}",
                catalog.len(),
                output.display()
            );
            Ok(())
        }
    }
}

fn list_versions(catalog: &VersionList, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!(
                "{} ({}): {} versions, {} signatures, {} paths",
                catalog.key,
                catalog.producer,
                catalog.len(),
                catalog.signature_count(),
                catalog.required_paths().len()
            );
            for version in &catalog.versions {
                if verbose {
                    println!("  {:<16} {} signatures", version.version, version.len());
                } else {
                    println!("  {}", version.version);
                }
            }
        }
        OutputFormat::Json => {
            let versions: Vec<serde_json::Value> = catalog
                .versions
                .iter()
                .map(|v| {
                    serde_json::json!({
                        "version": v.version,
                        "signatures": v.len(),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "key": catalog.key,
                "producer": catalog.producer,
                "versions": versions,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("version\tsignatures");
            for version in &catalog.versions {
                println!("{}\t{}", version.version, version.len());
            }
        }
    }
    Ok(())
}

fn show_version(catalog: &VersionList, version: &str, format: OutputFormat) -> anyhow::Result<()> {
    let definition = catalog
        .get(version)
        .ok_or_else(|| anyhow::anyhow!("Version '{version}' not found in catalog '{}'", catalog.key))?;

    match format {
        OutputFormat::Text => {
            println!("{} {}", catalog.key, definition.version);
            println!("{} signatures:", definition.len());
            for sig in &definition.signatures {
                println!("  {:<8} {}  {}", sig.algo, sig.hash, sig.path);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(definition)?);
        }
        OutputFormat::Tsv => {
            println!("path\talgo\thash");
            for sig in &definition.signatures {
                println!("{}\t{}\t{}", sig.path, sig.algo, sig.hash);
            }
        }
    }
    Ok(())
}

fn list_paths(catalog: &VersionList, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(catalog.required_paths())?);
        }
        OutputFormat::Text | OutputFormat::Tsv => {
            for path in catalog.required_paths() {
                println!("{path}");
            }
        }
    }
    Ok(())
}
