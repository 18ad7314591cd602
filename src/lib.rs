//! # version-solver
//!
//! A library for identifying the release version of a deployed web application
//! (WordPress and similar content-management systems) from its static files.
//!
//! Most releases ship a handful of static assets (readme files, stylesheets,
//! bundled scripts) whose content changes between versions. `version-solver`
//! fetches those assets from a live site and compares their digests against a
//! catalog of per-version file signatures.
//!
//! ## Features
//!
//! - **Exact matching**: a version whose every signature is satisfied
//! - **Closest matching**: falls back to the version with the most satisfied
//!   signatures when files are missing or were altered
//! - **Multiple digests**: SHA-256 and MD5 signatures
//! - **Concurrent fetching**: required paths are requested concurrently
//! - **Hot reload**: a new catalog is swapped in without disturbing runs in flight
//!
//! ## Example
//!
//! ```rust,no_run
//! use version_solver::{FetchedFile, MatchingEngine, VersionList};
//! use std::path::Path;
//!
//! let catalog = VersionList::load_from_file(Path::new("wordpress_versions.json")).unwrap();
//!
//! let files = vec![FetchedFile::new("readme.html", std::fs::read("readme.html").unwrap())];
//! let engine = MatchingEngine::new(&catalog);
//! println!("{}", engine.identify(&files).label());
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Signature catalog loading and storage
//! - [`core`]: Core data types for files, signatures, and results
//! - [`fetch`]: Fetcher trait and the HTTP implementation
//! - [`matching`]: Matching engine, scoring, and the identifier
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod fetch;
pub mod matching;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::shared::SharedCatalog;
pub use catalog::store::{CatalogError, VersionList};
pub use core::file::FetchedFile;
pub use core::signature::{DigestAlgorithm, Signature, VersionDefinition};
pub use core::types::*;
pub use fetch::{FetchError, Fetcher};
pub use matching::engine::{MatchingConfig, MatchingEngine};
pub use matching::identifier::{IdentificationReport, VersionIdentifier};
pub use matching::scoring::{file_matches_signature, files_match_version, VersionScore};
