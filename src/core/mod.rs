//! Core data types for version identification.
//!
//! - [`FetchedFile`]: a static asset retrieved from the target
//! - [`Signature`]: the expected digest of one file for one release
//! - [`VersionDefinition`]: the full signature set identifying one release
//! - [`DigestAlgorithm`]: the digest functions a signature may name
//! - [`Identification`], [`MatchType`]: result classification types
//!
//! Matching is exact byte-hash equality only. A file whose content was altered
//! by the site operator or a caching layer simply contributes nothing.
//!
//! [`FetchedFile`]: file::FetchedFile
//! [`Signature`]: signature::Signature
//! [`VersionDefinition`]: signature::VersionDefinition
//! [`DigestAlgorithm`]: signature::DigestAlgorithm
//! [`Identification`]: types::Identification
//! [`MatchType`]: types::MatchType

pub mod file;
pub mod signature;
pub mod types;
