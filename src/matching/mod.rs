//! Version matching engine and scoring.
//!
//! - [`VersionIdentifier`]: fetches the catalog's files from a target and
//!   identifies the version
//! - [`MatchingEngine`]: identifies a version from already fetched files
//! - [`VersionScore`]: how many of a version's signatures were satisfied
//!
//! ## Matching Algorithm
//!
//! 1. **Exact pass**: the first version, in catalog order, whose every
//!    signature is satisfied by a fetched file
//! 2. **Closest pass**: the version with the highest count of satisfied
//!    signatures; ties go to the earlier version
//! 3. **Unknown**: nothing was fetched, or no signature was satisfied
//!
//! The closest-match score is a raw count, not normalized by how many
//! signatures a version has.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use version_solver::fetch::http::{FetchConfig, HttpFetcher};
//! use version_solver::VersionIdentifier;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let fetcher = HttpFetcher::new(FetchConfig::default())?;
//! let identifier = VersionIdentifier::new(fetcher);
//! identifier.load_versions_signatures(Path::new("wordpress_versions.json"))?;
//!
//! let version = identifier.identify_version("https://blog.example.com/").await;
//! println!("{}", version.label());
//! # Ok(())
//! # }
//! ```
//!
//! [`VersionIdentifier`]: identifier::VersionIdentifier
//! [`MatchingEngine`]: engine::MatchingEngine
//! [`VersionScore`]: scoring::VersionScore

pub mod digests;
pub mod engine;
pub mod identifier;
pub mod scoring;
