//! Version signature catalog storage.
//!
//! A catalog maps a product key (e.g. `wordpress`) to an ordered list of
//! version definitions, each a set of `(path, algo, hash)` signatures. It is
//! loaded once from a JSON document and is immutable afterwards.
//!
//! ## Document Format
//!
//! ```json
//! {
//!   "key": "wordpress",
//!   "producer": "vane-data",
//!   "versions": [
//!     {
//!       "version": "4.9.1",
//!       "signatures": [
//!         {"path": "wp-includes/js/wp-embed.min.js", "hash": "9d5b...", "algo": "SHA256"}
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use version_solver::VersionList;
//! use std::path::Path;
//!
//! let catalog = VersionList::load_from_file(Path::new("wordpress_versions.json")).unwrap();
//!
//! // Paths to fetch from the target
//! for path in catalog.required_paths() {
//!     println!("{path}");
//! }
//! ```
//!
//! Reloading goes through [`shared::SharedCatalog`], which swaps in a freshly
//! loaded catalog without disturbing identifications already in flight.

pub mod shared;
pub mod store;
