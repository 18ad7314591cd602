//! Command-line interface for version-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **identify**: Identify the version served by a live target
//! - **catalog**: List, show, or export the contents of a signature catalog
//!
//! ## Usage
//!
//! ```text
//! # Identify a WordPress site
//! version-solver identify https://blog.example.com/ --catalog wordpress_versions.json
//!
//! # JSON output for scripting
//! version-solver identify https://blog.example.com/ --catalog wordpress_versions.json --format json
//!
//! # Paths that will be requested
//! version-solver catalog paths --catalog wordpress_versions.json
//! ```

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod identify;

#[derive(Parser)]
#[command(name = "version-solver")]
#[command(version)]
#[command(about = "Identify the version of a deployed web application from its static files")]
#[command(
    long_about = "version-solver fetches a fixed set of static files from a live site and compares their digests against a catalog of per-version file signatures.\n\nIt reports:\n- An exact match when every signature of a version is satisfied\n- The closest match when files are missing or were altered\n- \"unknown\" when no fetched file matches any known signature"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the version served by a target URL
    Identify(identify::IdentifyArgs),

    /// Inspect a signature catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
